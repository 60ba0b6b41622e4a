pub mod core {
    pub const SEED: u64 = 1337;
    pub const CHUNK_SIZE: f32 = 50.0;
    pub const LOAD_DISTANCE: i32 = 2;
    pub const CHUNK_SEGMENTS: usize = 10;
}
pub mod terrain {
    pub const NOISE_SCALE: f64 = 0.02;
    pub const OCTAVES: u32 = 4;
    pub const LACUNARITY: f64 = 2.0;
    pub const PERSISTENCE: f64 = 0.5;
    pub const SHAPING_EXPONENT: f64 = 1.1;
    pub const HEIGHT_SCALE: f32 = 6.0;
    pub const HEIGHT_OFFSET: f32 = 0.5;
    pub const WATER_LEVEL: f32 = -0.1;
}
pub mod biome {
    /// Offset above the water line below which ground reads as beach.
    pub const BEACH_MARGIN: f32 = 0.5;
    pub const MOUNTAIN_SLOPE: f32 = 0.7;
    /// Fraction of the chunk's tallest sample above which ground reads as highland.
    pub const HIGHLAND_FRACTION: f32 = 0.7;
}
pub mod decoration {
    pub const TREE_SLOTS: usize = 3;
    pub const TREE_ATTEMPTS: usize = 5;
    pub const ROCK_COUNT: usize = 2;
    pub const GRASS_COUNT: usize = 100;
    pub const FOREST_FREQUENCY: f64 = 0.008;
    pub const FOREST_OCTAVES: usize = 3;
}
pub use biome::*;
pub use core::*;
pub use decoration::*;
pub use terrain::*;
