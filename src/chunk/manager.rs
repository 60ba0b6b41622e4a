use bevy::prelude::*;
use bevy::utils::HashMap;

use super::data::{ChunkData, ChunkPos, ChunkTerrain};
use super::decoration::DecorationPlanner;
use super::mesh::{spawn_chunk, ChunkRenderAssets};
use crate::physics::collision::{check_collision, Collider};
use crate::physics::player::Player;
use crate::world::{ChunkEviction, ForestDensity, Lakes, TerrainGenerator, WorldGenConfig};

/// Borrowed world sources needed to build a chunk from scratch.
pub struct ChunkGenerator<'a> {
    pub config: &'a WorldGenConfig,
    pub terrain: &'a TerrainGenerator,
    pub lakes: &'a Lakes,
    pub forest: &'a ForestDensity,
}

impl ChunkGenerator<'_> {
    pub fn generate(&self, pos: ChunkPos) -> ChunkData {
        let terrain = ChunkTerrain::generate(
            pos,
            self.config.chunk_size,
            self.config.chunk_segments,
            self.terrain,
            self.lakes,
        );
        let (decorations, colliders) = DecorationPlanner {
            config: self.config,
            terrain: self.terrain,
            lakes: self.lakes,
            forest: self.forest,
        }
        .plan(pos);

        ChunkData {
            position: pos,
            terrain,
            decorations,
            colliders,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkResidency {
    Unloaded,
    Visible,
    Hidden,
}

pub struct ResidentChunk {
    pub data: ChunkData,
    pub visible: bool,
    pub entity: Option<Entity>,
}

/// What one window update changed, for the render side to mirror.
#[derive(Debug, Default, PartialEq)]
pub struct ChunkWindowChanges {
    pub created: Vec<ChunkPos>,
    pub shown: Vec<ChunkPos>,
    pub hidden: Vec<ChunkPos>,
    pub destroyed: Vec<(ChunkPos, Option<Entity>)>,
}

impl ChunkWindowChanges {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.shown.is_empty()
            && self.hidden.is_empty()
            && self.destroyed.is_empty()
    }
}

#[derive(Resource)]
pub struct ChunkManager {
    chunk_size: f32,
    load_distance: i32,
    eviction: ChunkEviction,
    chunks: HashMap<ChunkPos, ResidentChunk>,
    center: Option<ChunkPos>,
}

impl FromWorld for ChunkManager {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<WorldGenConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(&config)
    }
}

impl ChunkManager {
    pub fn new(config: &WorldGenConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            load_distance: config.load_distance.max(0),
            eviction: config.eviction,
            chunks: HashMap::default(),
            center: None,
        }
    }

    pub fn center(&self) -> Option<ChunkPos> {
        self.center
    }

    /// Keeps every chunk within the load distance of the player visible and
    /// evicts the rest. Chunks are generated at most once while resident.
    pub fn update(&mut self, player: Vec3, generator: &ChunkGenerator) -> ChunkWindowChanges {
        let center = ChunkPos::from_world_pos(player, self.chunk_size);
        let mut changes = ChunkWindowChanges::default();
        if self.center == Some(center) {
            return changes;
        }
        self.center = Some(center);

        let reach = self.load_distance;
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let pos = ChunkPos::new(center.x + dx, center.z + dz);
                match self.chunks.get_mut(&pos) {
                    Some(chunk) => {
                        if !chunk.visible {
                            chunk.visible = true;
                            changes.shown.push(pos);
                        }
                    }
                    None => {
                        self.chunks.insert(
                            pos,
                            ResidentChunk {
                                data: generator.generate(pos),
                                visible: true,
                                entity: None,
                            },
                        );
                        changes.created.push(pos);
                    }
                }
            }
        }

        let outside: Vec<ChunkPos> = self
            .chunks
            .keys()
            .filter(|pos| pos.chebyshev_distance(center) > reach)
            .copied()
            .collect();

        for pos in outside {
            match self.eviction {
                ChunkEviction::Hide => {
                    if let Some(chunk) = self.chunks.get_mut(&pos) {
                        if chunk.visible {
                            chunk.visible = false;
                            changes.hidden.push(pos);
                        }
                    }
                }
                ChunkEviction::Destroy => {
                    if let Some(chunk) = self.chunks.remove(&pos) {
                        changes.destroyed.push((pos, chunk.entity));
                    }
                }
            }
        }

        changes
    }

    pub fn state(&self, pos: ChunkPos) -> ChunkResidency {
        match self.chunks.get(&pos) {
            None => ChunkResidency::Unloaded,
            Some(chunk) if chunk.visible => ChunkResidency::Visible,
            Some(_) => ChunkResidency::Hidden,
        }
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&ChunkData> {
        self.chunks.get(&pos).map(|chunk| &chunk.data)
    }

    pub fn entity(&self, pos: ChunkPos) -> Option<Entity> {
        self.chunks.get(&pos).and_then(|chunk| chunk.entity)
    }

    pub fn set_entity(&mut self, pos: ChunkPos, entity: Entity) {
        if let Some(chunk) = self.chunks.get_mut(&pos) {
            chunk.entity = Some(entity);
        }
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn visible_count(&self) -> usize {
        self.chunks.values().filter(|chunk| chunk.visible).count()
    }

    /// Every collider registered by a resident chunk.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.chunks.values().flat_map(|chunk| chunk.data.colliders.iter())
    }

    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        check_collision(self.colliders(), point, radius)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn update_chunk_window(
    mut commands: Commands,
    mut manager: ResMut<ChunkManager>,
    mut meshes: ResMut<Assets<Mesh>>,
    assets: Res<ChunkRenderAssets>,
    config: Res<WorldGenConfig>,
    terrain: Res<TerrainGenerator>,
    lakes: Res<Lakes>,
    forest: Res<ForestDensity>,
    player_query: Query<&Transform, With<Player>>,
    mut visibility_query: Query<&mut Visibility, With<ChunkPos>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    let generator = ChunkGenerator {
        config: &config,
        terrain: &terrain,
        lakes: &lakes,
        forest: &forest,
    };
    let changes = manager.update(player_transform.translation, &generator);
    if changes.is_empty() {
        return;
    }

    for pos in &changes.created {
        let Some(data) = manager.chunk(*pos) else {
            continue;
        };
        let entity = spawn_chunk(&mut commands, &mut meshes, &assets, data);
        manager.set_entity(*pos, entity);
    }

    for (positions, visibility) in [
        (&changes.shown, Visibility::Inherited),
        (&changes.hidden, Visibility::Hidden),
    ] {
        for pos in positions {
            let Some(entity) = manager.entity(*pos) else {
                continue;
            };
            if let Ok(mut current) = visibility_query.get_mut(entity) {
                *current = visibility;
            }
        }
    }

    for (_, entity) in &changes.destroyed {
        if let Some(entity) = entity {
            commands.entity(*entity).despawn_recursive();
        }
    }

    debug!(
        "Chunk window moved to {:?}: {} created, {} shown, {} hidden, {} destroyed ({} resident)",
        manager.center(),
        changes.created.len(),
        changes.shown.len(),
        changes.hidden.len(),
        changes.destroyed.len(),
        manager.resident_count()
    );
}
