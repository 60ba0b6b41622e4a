use bevy::prelude::Resource;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use std::sync::Arc;

/// A single noise source sampled on the ground plane.
#[derive(Clone)]
pub struct NoiseLayer {
    noise: Arc<dyn NoiseFn<f64, 2> + Send + Sync>,
    amplitude: f64,
}

impl NoiseLayer {
    pub fn new_fbm(seed: u32, frequency: f64, amplitude: f64, octaves: usize) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_frequency(frequency)
            .set_octaves(octaves);
        Self {
            noise: Arc::new(fbm),
            amplitude,
        }
    }

    pub fn sample_2d(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x, z]) * self.amplitude
    }
}

/// Low-frequency "forest density" in `[0, 1]`, evaluated at world coordinates.
#[derive(Resource, Clone)]
pub struct ForestDensity {
    layer: NoiseLayer,
}

impl ForestDensity {
    pub fn new(seed: u64, frequency: f64, octaves: usize) -> Self {
        Self {
            layer: NoiseLayer::new_fbm(seed.wrapping_add(900) as u32, frequency, 1.0, octaves),
        }
    }

    pub fn density_at(&self, x: f32, z: f32) -> f32 {
        let raw = self.layer.sample_2d(x as f64, z as f64);
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}
