use bevy::prelude::*;

use crate::loading::GameState;

/// Per-frame ordering: input is read first, the chunk window follows the
/// player before movement queries colliders, and presentation reads the
/// settled state last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Chunks,
    Movement,
    Fishing,
    Presentation,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Chunks,
                FrameSet::Movement,
                FrameSet::Fishing,
                FrameSet::Presentation,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
