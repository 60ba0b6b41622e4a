use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

use super::config::WaterBodyConfig;
use super::WorldGenConfig;

const HARMONICS: usize = 3;
const SURFACE_RINGS: usize = 12;
const SURFACE_SEGMENTS: usize = 48;
const WAVE_SPEED: f32 = 1.0;
const WAVE_FREQUENCY: f32 = 0.05;
const WAVE_AMPLITUDE: f32 = 0.1;

const SHALLOW_COLOR: [f32; 4] = [0.20, 0.58, 0.80, 0.8];
const DEEP_COLOR: [f32; 4] = [0.0, 0.20, 0.45, 0.8];

#[derive(Clone, Copy, Debug, PartialEq)]
struct Harmonic {
    weight: f32,
    frequency: f32,
    phase: f32,
}

/// A lake with a perturbed circular shoreline.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterBody {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
    irregularity: f32,
    harmonics: [Harmonic; HARMONICS],
}

impl WaterBody {
    pub fn new(config: &WaterBodyConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut harmonics = [Harmonic {
            weight: 0.0,
            frequency: 0.0,
            phase: 0.0,
        }; HARMONICS];

        let mut total_weight = 0.0;
        for (i, harmonic) in harmonics.iter_mut().enumerate() {
            harmonic.weight = rng.gen_range(0.5..1.0);
            harmonic.frequency = (i as f32 + 2.0) + rng.gen_range(0..2) as f32;
            harmonic.phase = rng.gen_range(0.0..TAU);
            total_weight += harmonic.weight;
        }
        for harmonic in harmonics.iter_mut() {
            harmonic.weight /= total_weight;
        }

        Self {
            center: Vec2::from(config.center),
            radius: config.radius,
            depth: config.depth,
            irregularity: config.irregularity.clamp(0.0, 0.9),
            harmonics,
        }
    }

    /// Shoreline distance from the centre along `angle` (radians).
    pub fn shoreline_radius(&self, angle: f32) -> f32 {
        let wobble: f32 = self
            .harmonics
            .iter()
            .map(|h| h.weight * (h.frequency * angle + h.phase).sin())
            .sum();
        self.radius * (1.0 + self.irregularity * wobble)
    }

    /// Distance from the centre as a fraction of the shoreline, `>= 1.0` outside.
    pub fn normalized_distance(&self, point: Vec2) -> f32 {
        let offset = point - self.center;
        let distance = offset.length();
        if distance == 0.0 {
            return 0.0;
        }
        let angle = offset.y.atan2(offset.x);
        distance / self.shoreline_radius(angle)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.normalized_distance(point) < 1.0
    }

    pub fn depth_at(&self, point: Vec2) -> f32 {
        let t = self.normalized_distance(point);
        if t >= 1.0 {
            0.0
        } else {
            self.depth * (1.0 - t * t)
        }
    }

    pub fn color_at(&self, point: Vec2) -> [f32; 4] {
        let t = if self.depth > 0.0 {
            (self.depth_at(point) / self.depth).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut color = [0.0; 4];
        for (i, channel) in color.iter_mut().enumerate() {
            *channel = SHALLOW_COLOR[i] * (1.0 - t) + DEEP_COLOR[i] * t;
        }
        color
    }

    /// Polar grid covering the lake, positions relative to the centre.
    pub fn surface_geometry(&self, rings: usize, segments: usize) -> WaterGeometry {
        let rings = rings.max(1);
        let segments = segments.max(3);
        let mut positions = Vec::with_capacity(1 + rings * segments);
        let mut colors = Vec::with_capacity(positions.capacity());

        positions.push([0.0, 0.0, 0.0]);
        colors.push(self.color_at(self.center));

        for ring in 1..=rings {
            let fraction = ring as f32 / rings as f32;
            for segment in 0..segments {
                let angle = segment as f32 / segments as f32 * TAU;
                // Stay a hair inside the shoreline so the outer ring is shallow, not dry
                let r = self.shoreline_radius(angle) * fraction * 0.999;
                let local = Vec2::new(angle.cos() * r, angle.sin() * r);
                positions.push([local.x, 0.0, local.y]);
                colors.push(self.color_at(self.center + local));
            }
        }

        let mut indices = Vec::new();
        let ring_start = |ring: usize| 1 + (ring - 1) * segments;
        for segment in 0..segments {
            let next = (segment + 1) % segments;
            indices.extend_from_slice(&[0, (1 + next) as u32, (1 + segment) as u32]);
        }
        for ring in 2..=rings {
            let inner = ring_start(ring - 1);
            let outer = ring_start(ring);
            for segment in 0..segments {
                let next = (segment + 1) % segments;
                let (a, b) = ((inner + segment) as u32, (inner + next) as u32);
                let (c, d) = ((outer + segment) as u32, (outer + next) as u32);
                indices.extend_from_slice(&[a, b, c, b, d, c]);
            }
        }

        WaterGeometry {
            positions,
            colors,
            indices,
        }
    }
}

pub struct WaterGeometry {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl WaterGeometry {
    pub fn into_mesh(self) -> Mesh {
        let normals = vec![[0.0, 1.0, 0.0]; self.positions.len()];
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
            .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Every lake in the world. Lakes are fixed, not chunk-streamed.
#[derive(Resource, Clone, Debug, Default)]
pub struct Lakes {
    pub bodies: Vec<WaterBody>,
}

impl Lakes {
    pub fn from_config(config: &WorldGenConfig) -> Self {
        let bodies = config
            .water_bodies
            .iter()
            .enumerate()
            .map(|(i, body)| WaterBody::new(body, config.seed.wrapping_add(0x51A4 + i as u64)))
            .collect();
        Self { bodies }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bodies.iter().any(|body| body.contains(point))
    }

    /// Lowers ground inside a lake to its bed below `water_level`.
    pub fn carve(&self, point: Vec2, height: f32, water_level: f32) -> f32 {
        self.bodies.iter().fold(height, |ground, body| {
            let depth = body.depth_at(point);
            if depth > 0.0 {
                ground.min(water_level - depth)
            } else {
                ground
            }
        })
    }
}

/// Original vertex heights of an animated water mesh.
#[derive(Component)]
pub struct WaterSurface {
    pub base_heights: Vec<f32>,
}

pub fn wave_offset(time_seconds: f32, x: f32) -> f32 {
    (time_seconds * WAVE_SPEED + x * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE
}

/// Recomputes heights from the cached originals so offsets never accumulate.
pub fn apply_waves(positions: &mut [[f32; 3]], base_heights: &[f32], time_seconds: f32) {
    for (position, base) in positions.iter_mut().zip(base_heights) {
        position[1] = base + wave_offset(time_seconds, position[0]);
    }
}

pub fn spawn_water_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    lakes: Res<Lakes>,
    config: Res<WorldGenConfig>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: AlphaMode::Blend,
        metallic: 0.9,
        perceptual_roughness: 0.1,
        ..default()
    });

    for body in &lakes.bodies {
        let geometry = body.surface_geometry(SURFACE_RINGS, SURFACE_SEGMENTS);
        let base_heights = geometry.positions.iter().map(|p| p[1]).collect();
        let mesh = meshes.add(geometry.into_mesh());

        commands.spawn((
            PbrBundle {
                mesh,
                material: material.clone(),
                transform: Transform::from_xyz(body.center.x, config.water_level, body.center.y),
                ..default()
            },
            WaterSurface { base_heights },
            Name::new("Lake"),
        ));
    }

    info!("Placed {} water bodies", lakes.bodies.len());
}

pub fn animate_water(
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    query: Query<(&Handle<Mesh>, &WaterSurface)>,
) {
    let t = time.elapsed_seconds();
    for (handle, surface) in query.iter() {
        let Some(mesh) = meshes.get_mut(handle) else {
            continue;
        };
        if let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        {
            apply_waves(positions, &surface.base_heights, t);
        }
    }
}
