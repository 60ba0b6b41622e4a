use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

use super::data::ChunkPos;
use crate::physics::collision::Collider;
use crate::world::{ground_height, ForestDensity, Lakes, TerrainGenerator, WorldGenConfig};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeVariant {
    Shrub,
    Pine,
    Oak,
}

impl TreeVariant {
    fn pick(rng: &mut StdRng) -> Self {
        match rng.gen_range(0..10) {
            0..=2 => TreeVariant::Shrub,
            3..=6 => TreeVariant::Pine,
            _ => TreeVariant::Oak,
        }
    }

    /// Large trees block movement.
    pub fn is_large(&self) -> bool {
        !matches!(self, TreeVariant::Shrub)
    }

    pub fn trunk_height(&self) -> f32 {
        match self {
            TreeVariant::Shrub => 0.8,
            TreeVariant::Pine => 3.0,
            TreeVariant::Oak => 2.4,
        }
    }

    pub fn collider_radius(&self) -> f32 {
        match self {
            TreeVariant::Shrub => 0.0,
            TreeVariant::Pine => 0.6,
            TreeVariant::Oak => 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Tree(TreeVariant),
    Rock,
    Grass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// World-space base of the instance, resting on the ground.
    pub position: Vec3,
    pub rotation: f32,
    pub scale: f32,
}

/// Stable per-chunk seed so decorations come back identical after regeneration.
pub fn chunk_seed(world_seed: u64, pos: ChunkPos) -> u64 {
    let mut hash = FNV_OFFSET_BASIS ^ world_seed;
    for part in [pos.x as u32 as u64, pos.z as u32 as u64] {
        hash ^= part;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

pub struct DecorationPlanner<'a> {
    pub config: &'a WorldGenConfig,
    pub terrain: &'a TerrainGenerator,
    pub lakes: &'a Lakes,
    pub forest: &'a ForestDensity,
}

impl DecorationPlanner<'_> {
    /// Places trees, rocks and grass for one chunk and returns the colliders of large trees.
    pub fn plan(&self, pos: ChunkPos) -> (Vec<Decoration>, Vec<Collider>) {
        let mut rng = StdRng::seed_from_u64(chunk_seed(self.config.seed, pos));
        let origin = pos.origin(self.config.chunk_size);
        let mut decorations = Vec::new();
        let mut colliders = Vec::new();

        // Rejection sampling against forest density, bounded per slot
        for _ in 0..self.config.tree_slots {
            for _ in 0..self.config.tree_attempts {
                let point = self.random_point(&mut rng, origin);
                let density = self.forest.density_at(point.x, point.y);
                let roll: f32 = rng.gen();
                if roll >= density || !self.is_dry_land(point) {
                    continue;
                }

                let variant = TreeVariant::pick(&mut rng);
                let scale = rng.gen_range(0.8..1.3);
                if variant.is_large() {
                    colliders.push(Collider::new(point, variant.collider_radius() * scale));
                }
                decorations.push(self.place(DecorationKind::Tree(variant), point, &mut rng, scale));
                break;
            }
        }

        for _ in 0..self.config.rock_count {
            let point = self.random_point(&mut rng, origin);
            let scale = rng.gen_range(0.4..1.1);
            if !self.lakes.contains(point) {
                decorations.push(self.place(DecorationKind::Rock, point, &mut rng, scale));
            }
        }

        for _ in 0..self.config.grass_count {
            let point = self.random_point(&mut rng, origin);
            let scale = rng.gen_range(0.6..1.2);
            if !self.lakes.contains(point) {
                decorations.push(self.place(DecorationKind::Grass, point, &mut rng, scale));
            }
        }

        (decorations, colliders)
    }

    fn random_point(&self, rng: &mut StdRng, origin: Vec2) -> Vec2 {
        let size = self.config.chunk_size;
        origin + Vec2::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size))
    }

    fn is_dry_land(&self, point: Vec2) -> bool {
        !self.lakes.contains(point)
            && self.terrain.height_at(point.x, point.y)
                > self.config.water_level + self.config.beach_margin
    }

    fn place(&self, kind: DecorationKind, point: Vec2, rng: &mut StdRng, scale: f32) -> Decoration {
        let y = ground_height(self.terrain, self.lakes, point.x, point.y);
        Decoration {
            kind,
            position: Vec3::new(point.x, y, point.y),
            rotation: rng.gen_range(0.0..TAU),
            scale,
        }
    }
}
