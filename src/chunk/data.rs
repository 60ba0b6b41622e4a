use bevy::prelude::*;
use std::fmt;

use super::decoration::Decoration;
use crate::physics::collision::Collider;
use crate::world::{ground_height, Biome, Lakes, TerrainGenerator};

/// Integer tile coordinates: `(floor(x / size), floor(z / size))`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn from_world_pos(pos: Vec3, chunk_size: f32) -> Self {
        Self {
            x: (pos.x / chunk_size).floor() as i32,
            z: (pos.z / chunk_size).floor() as i32,
        }
    }

    /// World-space corner with the smallest x and z.
    pub fn origin(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    pub fn chebyshev_distance(&self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    pub height: f32,
    pub biome: Biome,
}

impl TerrainSample {
    pub fn color(&self) -> [f32; 4] {
        self.biome.color()
    }
}

/// Heightfield grid of `(segments + 1)^2` samples in row-major (z, then x) order.
#[derive(Clone, Debug)]
pub struct ChunkTerrain {
    pub origin: Vec2,
    pub size: f32,
    pub segments: usize,
    pub samples: Vec<TerrainSample>,
    pub max_height: f32,
}

impl ChunkTerrain {
    /// Two passes: heights and the chunk maximum first, then slope and biome.
    pub fn generate(
        pos: ChunkPos,
        size: f32,
        segments: usize,
        terrain: &TerrainGenerator,
        lakes: &Lakes,
    ) -> Self {
        let segments = segments.max(1);
        let origin = pos.origin(size);
        let step = size / segments as f32;
        let side = segments + 1;

        let mut heights = Vec::with_capacity(side * side);
        let mut max_height = f32::NEG_INFINITY;
        for iz in 0..side {
            for ix in 0..side {
                let x = origin.x + ix as f32 * step;
                let z = origin.y + iz as f32 * step;
                let height = ground_height(terrain, lakes, x, z);
                max_height = max_height.max(height);
                heights.push(height);
            }
        }

        let samples = heights
            .iter()
            .enumerate()
            .map(|(i, &height)| {
                let x = origin.x + (i % side) as f32 * step;
                let z = origin.y + (i / side) as f32 * step;
                let slope = terrain.slope_at(x, z);
                TerrainSample {
                    height,
                    biome: terrain.biome_at(height, slope, max_height),
                }
            })
            .collect();

        Self {
            origin,
            size,
            segments,
            samples,
            max_height,
        }
    }

    pub fn side(&self) -> usize {
        self.segments + 1
    }

    pub fn step(&self) -> f32 {
        self.size / self.segments as f32
    }

    pub fn sample(&self, ix: usize, iz: usize) -> &TerrainSample {
        &self.samples[iz * self.side() + ix]
    }

    pub fn world_position(&self, ix: usize, iz: usize) -> Vec3 {
        Vec3::new(
            self.origin.x + ix as f32 * self.step(),
            self.sample(ix, iz).height,
            self.origin.y + iz as f32 * self.step(),
        )
    }

    /// Biome of the grid sample nearest to a world position inside the chunk.
    pub fn biome_near(&self, x: f32, z: f32) -> Biome {
        let max_index = self.segments as f32;
        let ix = ((x - self.origin.x) / self.step()).round().clamp(0.0, max_index) as usize;
        let iz = ((z - self.origin.y) / self.step()).round().clamp(0.0, max_index) as usize;
        self.sample(ix, iz).biome
    }
}

/// Everything generated for one chunk. Immutable once built.
#[derive(Clone, Debug)]
pub struct ChunkData {
    pub position: ChunkPos,
    pub terrain: ChunkTerrain,
    pub decorations: Vec<Decoration>,
    pub colliders: Vec<Collider>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldGenConfig;

    struct World {
        config: WorldGenConfig,
        terrain: TerrainGenerator,
        lakes: Lakes,
    }

    impl World {
        fn new() -> Self {
            let config = WorldGenConfig::default();
            Self {
                terrain: TerrainGenerator::new(&config),
                lakes: Lakes::from_config(&config),
                config,
            }
        }

        fn generate(&self, pos: ChunkPos) -> ChunkTerrain {
            ChunkTerrain::generate(
                pos,
                self.config.chunk_size,
                self.config.chunk_segments,
                &self.terrain,
                &self.lakes,
            )
        }
    }

    #[test]
    fn chunk_pos_floors_negative_coordinates() {
        let pos = |x, y, z| ChunkPos::from_world_pos(Vec3::new(x, y, z), 50.0);
        assert_eq!(pos(-0.1, 0.0, 49.9), ChunkPos::new(-1, 0));
        assert_eq!(pos(50.0, 3.0, -50.0), ChunkPos::new(1, -1));
        assert_eq!(ChunkPos::new(-3, 7).to_string(), "-3,7");
    }

    #[test]
    fn chebyshev_distance_uses_larger_axis() {
        let a = ChunkPos::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkPos::new(2, -1)), 2);
        assert_eq!(a.chebyshev_distance(ChunkPos::new(-1, 3)), 3);
        assert_eq!(a.chebyshev_distance(a), 0);
    }

    #[test]
    fn shared_edge_heights_match_between_neighbours() {
        let world = World::new();
        for &(cx, cz) in &[(3, 4), (-2, -5), (0, 0)] {
            let left = world.generate(ChunkPos::new(cx, cz));
            let right = world.generate(ChunkPos::new(cx + 1, cz));
            let last = left.segments;
            for iz in 0..left.side() {
                let a = left.world_position(last, iz);
                let b = right.world_position(0, iz);
                assert!((a.x - b.x).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4);
                assert!((a.y - b.y).abs() < 1e-5, "seam at {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn regenerating_a_chunk_is_idempotent() {
        let world = World::new();
        let pos = ChunkPos::new(-4, 2);
        let a = world.generate(pos);
        let b = world.generate(pos);
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.max_height, b.max_height);
    }

    #[test]
    fn max_height_is_the_tallest_sample() {
        let chunk = World::new().generate(ChunkPos::new(5, -3));
        let tallest = chunk
            .samples
            .iter()
            .map(|s| s.height)
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(chunk.max_height, tallest);
        assert_eq!(chunk.samples.len(), chunk.side() * chunk.side());
    }

    #[test]
    fn lake_beds_read_as_beach() {
        let world = World::new();
        let lake = &world.lakes.bodies[0];
        let center = Vec3::new(lake.center.x, 0.0, lake.center.y);
        let chunk = world.generate(ChunkPos::from_world_pos(center, world.config.chunk_size));
        assert_eq!(chunk.biome_near(lake.center.x, lake.center.y), Biome::Beach);
    }
}
