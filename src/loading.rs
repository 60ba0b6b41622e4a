use bevy::prelude::*;

use crate::texture::GroundTexture;

/// Game states for managing loading and gameplay flow
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingPhase {
    #[default]
    Initializing,
    PreparingAssets,
    Complete,
}

impl LoadingPhase {
    pub fn description(&self) -> &str {
        match self {
            LoadingPhase::Initializing => "Restoring saved progress...",
            LoadingPhase::PreparingAssets => "Preparing textures...",
            LoadingPhase::Complete => "Ready to fish!",
        }
    }

    /// Next phase, given whether the ground texture is in place.
    pub fn advance(self, textures_ready: bool) -> Self {
        match self {
            LoadingPhase::Initializing => LoadingPhase::PreparingAssets,
            LoadingPhase::PreparingAssets if textures_ready => LoadingPhase::Complete,
            other => other,
        }
    }
}

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub current_phase: LoadingPhase,
}

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<LoadingProgress>()
            .add_systems(OnEnter(GameState::Loading), setup_loading)
            .add_systems(Update, update_loading.run_if(in_state(GameState::Loading)))
            .add_systems(OnEnter(GameState::Playing), setup_gameplay);
    }
}

fn setup_loading() {
    info!("Entering loading state");
}

fn update_loading(
    mut next_state: ResMut<NextState<GameState>>,
    mut progress: ResMut<LoadingProgress>,
    ground: Option<Res<GroundTexture>>,
) {
    let next = progress.current_phase.advance(ground.is_some());
    if next != progress.current_phase {
        info!(
            "Loading phase: {:?} -> {:?} ({})",
            progress.current_phase,
            next,
            next.description()
        );
        progress.current_phase = next;
    }
    if progress.current_phase == LoadingPhase::Complete {
        next_state.set(GameState::Playing);
    }
}

fn setup_gameplay() {
    info!("Starting gameplay");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_waits_for_textures() {
        let phase = LoadingPhase::Initializing.advance(false);
        assert_eq!(phase, LoadingPhase::PreparingAssets);
        assert_eq!(phase.advance(false), LoadingPhase::PreparingAssets);
        assert_eq!(phase.advance(true), LoadingPhase::Complete);
        assert_eq!(LoadingPhase::Complete.advance(true), LoadingPhase::Complete);
    }
}
