use bevy::prelude::Resource;

use super::biome::{Biome, BiomeThresholds};
use super::noise_field::NoiseField;
use super::WorldGenConfig;

/// Octave-summed heightfield over a [`NoiseField`] plus biome classification.
#[derive(Resource, Clone)]
pub struct TerrainGenerator {
    noise: NoiseField,
    noise_scale: f64,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
    shaping_exponent: f64,
    height_scale: f32,
    height_offset: f32,
    thresholds: BiomeThresholds,
}

impl TerrainGenerator {
    pub fn new(config: &WorldGenConfig) -> Self {
        Self {
            noise: NoiseField::new(config.seed),
            noise_scale: config.noise_scale,
            octaves: config.octaves.max(1),
            lacunarity: config.lacunarity,
            persistence: config.persistence,
            shaping_exponent: config.shaping_exponent,
            height_scale: config.height_scale,
            height_offset: config.height_offset,
            thresholds: BiomeThresholds::from_config(config),
        }
    }

    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn water_level(&self) -> f32 {
        self.thresholds.water_level
    }

    /// Normalised octave sum in `[-1, 1]` before shaping.
    pub fn raw_noise(&self, x: f32, z: f32) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.noise_scale;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += self
                .noise
                .sample(x as f64 * frequency, z as f64 * frequency)
                * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let n = self.raw_noise(x, z);
        // Sharpen peaks and valleys
        let shaped = n.signum() * n.abs().powf(self.shaping_exponent);
        shaped as f32 * self.height_scale + self.height_offset
    }

    /// Largest absolute height delta between the samples one unit either side, over both axes.
    pub fn slope_at(&self, x: f32, z: f32) -> f32 {
        let dx = self.height_at(x + 1.0, z) - self.height_at(x - 1.0, z);
        let dz = self.height_at(x, z + 1.0) - self.height_at(x, z - 1.0);
        dx.abs().max(dz.abs())
    }

    pub fn biome_at(&self, height: f32, slope: f32, chunk_max_height: f32) -> Biome {
        self.thresholds.classify(height, slope, chunk_max_height)
    }
}
