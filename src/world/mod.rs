use bevy::prelude::*;

use crate::loading::GameState;

pub mod biome;
pub mod config;
pub mod defaults;
pub mod noise_field;
pub mod noise_layers;
pub mod terrain;
pub mod water;

pub use biome::Biome;
pub use config::{ChunkEviction, WorldGenConfig};
pub use noise_layers::ForestDensity;
pub use terrain::TerrainGenerator;
pub use water::Lakes;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<WorldGenConfig>()
            .cloned()
            .unwrap_or_default();

        let terrain = TerrainGenerator::new(&config);
        info!(
            "World seed {} (chunk size {}, load distance {}, eviction {:?})",
            terrain.seed(),
            config.chunk_size,
            config.load_distance,
            config.eviction
        );

        app.insert_resource(terrain)
            .insert_resource(Lakes::from_config(&config))
            .insert_resource(ForestDensity::new(
                config.seed,
                config.forest_frequency,
                config.forest_octaves,
            ))
            .insert_resource(config)
            .add_systems(OnEnter(GameState::Playing), water::spawn_water_bodies)
            .add_systems(
                Update,
                water::animate_water.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Walkable ground height at a world position, lake beds included.
pub fn ground_height(terrain: &TerrainGenerator, lakes: &Lakes, x: f32, z: f32) -> f32 {
    lakes.carve(Vec2::new(x, z), terrain.height_at(x, z), terrain.water_level())
}
