use crate::loading::GameState;
use crate::schedule::FrameSet;
use bevy::prelude::*;

pub mod data;
pub mod decoration;
pub mod manager;
pub mod mesh;

pub use data::ChunkPos;
pub use manager::ChunkManager;

pub struct ChunkPlugin;

impl Plugin for ChunkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChunkManager>()
            .add_systems(OnEnter(GameState::Playing), mesh::setup_chunk_render_assets)
            .add_systems(
                Update,
                manager::update_chunk_window.in_set(FrameSet::Chunks),
            );
    }
}
