use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::data::{ChunkData, ChunkTerrain};
use super::decoration::{Decoration, DecorationKind, TreeVariant};
use crate::texture::GroundTexture;

/// How many times the ground texture repeats across one chunk.
const TEXTURE_REPEAT: f32 = 4.0;

/// Shared decoration meshes and materials, built once per session.
#[derive(Resource)]
pub struct ChunkRenderAssets {
    pub terrain_material: Handle<StandardMaterial>,
    trunk: Handle<Mesh>,
    pine_crown: Handle<Mesh>,
    round_crown: Handle<Mesh>,
    rock: Handle<Mesh>,
    grass: Handle<Mesh>,
    bark: Handle<StandardMaterial>,
    needles: Handle<StandardMaterial>,
    leaves: Handle<StandardMaterial>,
    stone: Handle<StandardMaterial>,
    blade: Handle<StandardMaterial>,
}

pub fn setup_chunk_render_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    ground: Option<Res<GroundTexture>>,
) {
    let terrain_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: ground.map(|ground| ground.image.clone()),
        perceptual_roughness: 0.95,
        metallic: 0.0,
        reflectance: 0.1,
        ..default()
    });

    let matte = |color: Color| StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.9,
        ..default()
    };

    commands.insert_resource(ChunkRenderAssets {
        terrain_material,
        trunk: meshes.add(Cylinder::new(0.18, 1.0)),
        pine_crown: meshes.add(Cone {
            radius: 1.1,
            height: 2.6,
        }),
        round_crown: meshes.add(Sphere::new(1.2)),
        rock: meshes.add(Sphere::new(0.6)),
        grass: meshes.add(Rectangle::new(0.08, 0.5)),
        bark: materials.add(matte(Color::srgb(0.40, 0.26, 0.13))),
        needles: materials.add(matte(Color::srgb(0.13, 0.37, 0.18))),
        leaves: materials.add(matte(Color::srgb(0.24, 0.55, 0.20))),
        stone: materials.add(matte(Color::srgb(0.50, 0.50, 0.50))),
        blade: materials.add(StandardMaterial {
            base_color: Color::srgb(0.36, 0.66, 0.25),
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
    });
}

pub struct TerrainGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl TerrainGeometry {
    /// Vertices are relative to the chunk origin.
    pub fn from_terrain(terrain: &ChunkTerrain) -> Self {
        let side = terrain.side();
        let step = terrain.step();
        let mut positions = Vec::with_capacity(side * side);
        let mut uvs = Vec::with_capacity(side * side);
        let mut colors = Vec::with_capacity(side * side);

        for iz in 0..side {
            for ix in 0..side {
                let sample = terrain.sample(ix, iz);
                positions.push([ix as f32 * step, sample.height, iz as f32 * step]);
                uvs.push([
                    ix as f32 / terrain.segments as f32 * TEXTURE_REPEAT,
                    iz as f32 / terrain.segments as f32 * TEXTURE_REPEAT,
                ]);
                colors.push(sample.color());
            }
        }

        let mut indices = Vec::with_capacity(terrain.segments * terrain.segments * 6);
        for iz in 0..terrain.segments {
            for ix in 0..terrain.segments {
                let a = (iz * side + ix) as u32;
                let b = a + 1;
                let c = a + side as u32;
                let d = c + 1;
                // Counter-clockwise seen from above
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self {
            normals: heightfield_normals(terrain),
            positions,
            uvs,
            colors,
            indices,
        }
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Central differences inside the grid, one-sided on the border.
pub fn heightfield_normals(terrain: &ChunkTerrain) -> Vec<[f32; 3]> {
    let side = terrain.side();
    let step = terrain.step();
    let height = |ix: usize, iz: usize| terrain.sample(ix, iz).height;
    let mut normals = Vec::with_capacity(side * side);

    for iz in 0..side {
        for ix in 0..side {
            let (x0, x1) = (ix.saturating_sub(1), (ix + 1).min(side - 1));
            let (z0, z1) = (iz.saturating_sub(1), (iz + 1).min(side - 1));
            let dx = (height(x1, iz) - height(x0, iz)) / ((x1 - x0) as f32 * step);
            let dz = (height(ix, z1) - height(ix, z0)) / ((z1 - z0) as f32 * step);
            normals.push(Vec3::new(-dx, 1.0, -dz).normalize().to_array());
        }
    }

    normals
}

/// Spawns the terrain mesh with its decorations as children and returns the root entity.
pub fn spawn_chunk(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    assets: &ChunkRenderAssets,
    data: &ChunkData,
) -> Entity {
    let origin = data.terrain.origin;
    let mesh = meshes.add(TerrainGeometry::from_terrain(&data.terrain).into_mesh());

    commands
        .spawn((
            PbrBundle {
                mesh,
                material: assets.terrain_material.clone(),
                transform: Transform::from_xyz(origin.x, 0.0, origin.y),
                ..default()
            },
            data.position,
            Name::new(format!("Chunk {}", data.position)),
        ))
        .with_children(|parent| {
            for decoration in &data.decorations {
                let local = decoration.position - Vec3::new(origin.x, 0.0, origin.y);
                spawn_decoration(parent, assets, decoration, local);
            }
        })
        .id()
}

fn spawn_decoration(
    parent: &mut ChildBuilder,
    assets: &ChunkRenderAssets,
    decoration: &Decoration,
    local: Vec3,
) {
    let transform = Transform::from_translation(local)
        .with_rotation(Quat::from_rotation_y(decoration.rotation))
        .with_scale(Vec3::splat(decoration.scale));

    match decoration.kind {
        DecorationKind::Tree(variant) => {
            let trunk_height = variant.trunk_height();
            let (crown_mesh, crown_material, crown_offset) = match variant {
                TreeVariant::Pine => (&assets.pine_crown, &assets.needles, trunk_height + 1.0),
                TreeVariant::Oak => (&assets.round_crown, &assets.leaves, trunk_height + 0.8),
                TreeVariant::Shrub => (&assets.round_crown, &assets.leaves, trunk_height * 0.5),
            };
            let crown_scale = if variant.is_large() { 1.0 } else { 0.6 };

            parent
                .spawn(SpatialBundle::from_transform(transform))
                .with_children(|tree| {
                    tree.spawn(PbrBundle {
                        mesh: assets.trunk.clone(),
                        material: assets.bark.clone(),
                        transform: Transform::from_xyz(0.0, trunk_height * 0.5, 0.0)
                            .with_scale(Vec3::new(1.0, trunk_height, 1.0)),
                        ..default()
                    });
                    tree.spawn(PbrBundle {
                        mesh: crown_mesh.clone(),
                        material: crown_material.clone(),
                        transform: Transform::from_xyz(0.0, crown_offset, 0.0)
                            .with_scale(Vec3::splat(crown_scale)),
                        ..default()
                    });
                });
        }
        DecorationKind::Rock => {
            parent.spawn(PbrBundle {
                mesh: assets.rock.clone(),
                material: assets.stone.clone(),
                transform: transform.with_scale(Vec3::new(1.0, 0.6, 0.8) * decoration.scale),
                ..default()
            });
        }
        DecorationKind::Grass => {
            parent.spawn(PbrBundle {
                mesh: assets.grass.clone(),
                material: assets.blade.clone(),
                transform: transform
                    .with_translation(local + Vec3::Y * 0.25 * decoration.scale),
                ..default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::data::{ChunkPos, TerrainSample};
    use crate::world::Biome;

    fn terrain_from(heights: impl Fn(usize, usize) -> f32, segments: usize) -> ChunkTerrain {
        let side = segments + 1;
        let samples = (0..side * side)
            .map(|i| TerrainSample {
                height: heights(i % side, i / side),
                biome: Biome::Plains,
            })
            .collect();
        ChunkTerrain {
            origin: ChunkPos::new(0, 0).origin(10.0),
            size: 10.0,
            segments,
            samples,
            max_height: 0.0,
        }
    }

    #[test]
    fn flat_ground_points_straight_up() {
        let terrain = terrain_from(|_, _| 2.0, 4);
        for normal in heightfield_normals(&terrain) {
            assert_eq!(normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn ramp_normals_lean_against_the_slope() {
        let terrain = terrain_from(|ix, _| ix as f32, 4);
        let normals = heightfield_normals(&terrain);
        for normal in normals {
            assert!(normal[0] < 0.0);
            assert!(normal[1] > 0.0);
            assert!(normal[2].abs() < 1e-6);
        }
    }

    #[test]
    fn geometry_has_one_vertex_per_sample() {
        let terrain = terrain_from(|_, _| 0.0, 10);
        let geometry = TerrainGeometry::from_terrain(&terrain);
        assert_eq!(geometry.positions.len(), 121);
        assert_eq!(geometry.indices.len(), 10 * 10 * 6);
        assert!(geometry.indices.iter().all(|&i| (i as usize) < 121));
        assert_eq!(geometry.uvs[120], [TEXTURE_REPEAT, TEXTURE_REPEAT]);
    }

    #[test]
    fn triangles_face_upwards() {
        let terrain = terrain_from(|_, _| 0.0, 2);
        let geometry = TerrainGeometry::from_terrain(&terrain);
        for triangle in geometry.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(geometry.positions[triangle[k] as usize]));
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }
}
