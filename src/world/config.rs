use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use super::defaults;

/// What happens to a resident chunk that leaves the load window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkEviction {
    /// Keep geometry, toggle visibility. Re-entering the window only shows it again.
    #[default]
    Hide,
    /// Drop the chunk entirely; re-entering regenerates it from scratch.
    Destroy,
}

/// A lake placed at fixed world coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterBodyConfig {
    pub center: [f32; 2],
    pub radius: f32,
    pub depth: f32,
    /// Relative amplitude of the shoreline perturbation.
    pub irregularity: f32,
}

#[derive(Resource, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u64,
    pub chunk_size: f32,
    pub load_distance: i32,
    pub chunk_segments: usize,
    pub eviction: ChunkEviction,
    pub noise_scale: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub persistence: f64,
    pub shaping_exponent: f64,
    pub height_scale: f32,
    pub height_offset: f32,
    pub water_level: f32,
    pub beach_margin: f32,
    pub mountain_slope: f32,
    pub highland_fraction: f32,
    pub tree_slots: usize,
    pub tree_attempts: usize,
    pub rock_count: usize,
    pub grass_count: usize,
    pub forest_frequency: f64,
    pub forest_octaves: usize,
    pub water_bodies: Vec<WaterBodyConfig>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        use defaults::*;

        Self {
            seed: SEED,
            chunk_size: CHUNK_SIZE,
            load_distance: LOAD_DISTANCE,
            chunk_segments: CHUNK_SEGMENTS,
            eviction: ChunkEviction::Hide,
            noise_scale: NOISE_SCALE,
            octaves: OCTAVES,
            lacunarity: LACUNARITY,
            persistence: PERSISTENCE,
            shaping_exponent: SHAPING_EXPONENT,
            height_scale: HEIGHT_SCALE,
            height_offset: HEIGHT_OFFSET,
            water_level: WATER_LEVEL,
            beach_margin: BEACH_MARGIN,
            mountain_slope: MOUNTAIN_SLOPE,
            highland_fraction: HIGHLAND_FRACTION,
            tree_slots: TREE_SLOTS,
            tree_attempts: TREE_ATTEMPTS,
            rock_count: ROCK_COUNT,
            grass_count: GRASS_COUNT,
            forest_frequency: FOREST_FREQUENCY,
            forest_octaves: FOREST_OCTAVES,
            water_bodies: vec![
                WaterBodyConfig {
                    center: [0.0, -12.0],
                    radius: 40.0,
                    depth: 6.0,
                    irregularity: 0.18,
                },
                WaterBodyConfig {
                    center: [140.0, 95.0],
                    radius: 22.0,
                    depth: 3.5,
                    irregularity: 0.25,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: WorldGenConfig =
            serde_json::from_str(r#"{ "seed": 9, "load_distance": 3 }"#).expect("parse config");
        assert_eq!(config.seed, 9);
        assert_eq!(config.load_distance, 3);
        assert_eq!(config.chunk_size, defaults::CHUNK_SIZE);
        assert_eq!(config.octaves, defaults::OCTAVES);
        assert_eq!(config.eviction, ChunkEviction::Hide);
        assert_eq!(config.water_bodies.len(), 2);
    }

    #[test]
    fn eviction_mode_is_configurable() {
        let config: WorldGenConfig =
            serde_json::from_str(r#"{ "eviction": "Destroy" }"#).expect("parse config");
        assert_eq!(config.eviction, ChunkEviction::Destroy);
    }
}
