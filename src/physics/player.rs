use bevy::prelude::*;

use super::collision::resolve_step;
use crate::chunk::ChunkManager;
use crate::fishing::FishingSession;
use crate::input::InputState;
use crate::schedule::FrameSet;
use crate::world::{ground_height, Lakes, TerrainGenerator};

pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_RADIUS: f32 = 0.5;
/// Height of the avatar's origin above whatever it stands on.
pub const STANDING_OFFSET: f32 = 1.0;
pub const SPAWN_POINT: Vec2 = Vec2::new(0.0, 42.0);

#[derive(Component)]
pub struct Player;

pub struct PlayerPhysicsPlugin;

impl Plugin for PlayerPhysicsPlugin {
    fn build(&self, app: &mut App) {
        info!("PlayerPhysicsPlugin initializing");
        app.add_systems(Update, move_player.in_set(FrameSet::Movement));
    }
}

/// Ground or water surface under a point, plus the avatar offset.
pub fn standing_height(terrain: &TerrainGenerator, lakes: &Lakes, x: f32, z: f32) -> f32 {
    ground_height(terrain, lakes, x, z).max(terrain.water_level()) + STANDING_OFFSET
}

/// Yaw that faces the avatar along its direction of travel.
pub fn facing(direction: Vec2) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.y))
}

pub fn spawn_position(terrain: &TerrainGenerator, lakes: &Lakes) -> Vec3 {
    Vec3::new(
        SPAWN_POINT.x,
        standing_height(terrain, lakes, SPAWN_POINT.x, SPAWN_POINT.y),
        SPAWN_POINT.y,
    )
}

fn move_player(
    input: Res<InputState>,
    time: Res<Time>,
    session: Res<FishingSession>,
    chunks: Res<ChunkManager>,
    terrain: Res<TerrainGenerator>,
    lakes: Res<Lakes>,
    mut player_query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = player_query.get_single_mut() else {
        return;
    };
    // Feet stay planted while a line is out
    if session.machine.is_active() {
        return;
    }

    let direction = input.movement().normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }

    let from = Vec2::new(transform.translation.x, transform.translation.z);
    let delta = direction * PLAYER_SPEED * time.delta_seconds();
    let to = resolve_step(from, delta, |point| {
        chunks.check_collision(point, PLAYER_RADIUS)
    });

    transform.translation = Vec3::new(to.x, standing_height(&terrain, &lakes, to.x, to.y), to.y);
    transform.rotation = facing(direction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldGenConfig;

    #[test]
    fn avatar_floats_on_water_and_stands_on_land() {
        let config = WorldGenConfig::default();
        let terrain = TerrainGenerator::new(&config);
        let lakes = Lakes::from_config(&config);

        let lake = lakes.bodies[0].center;
        let on_water = standing_height(&terrain, &lakes, lake.x, lake.y);
        assert_eq!(on_water, config.water_level + STANDING_OFFSET);

        for i in 0..50 {
            let (x, z) = (400.0 + i as f32 * 3.0, -300.0);
            let expected = terrain.height_at(x, z).max(config.water_level) + STANDING_OFFSET;
            assert_eq!(standing_height(&terrain, &lakes, x, z), expected);
        }
    }

    #[test]
    fn facing_follows_travel_direction() {
        let toward_camera = facing(Vec2::new(0.0, 1.0)) * Vec3::Z;
        assert!((toward_camera - Vec3::Z).length() < 1e-5);
        let right = facing(Vec2::new(1.0, 0.0)) * Vec3::Z;
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn spawn_point_is_outside_the_lakes() {
        let config = WorldGenConfig::default();
        let lakes = Lakes::from_config(&config);
        assert!(!lakes.contains(SPAWN_POINT));
    }
}
