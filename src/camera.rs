use bevy::pbr::{FogFalloff, FogSettings};
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;

use crate::loading::GameState;
use crate::physics::Player;
use crate::schedule::FrameSet;

pub const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 15.0, 20.0);
const FOG_START: f32 = 50.0;
const FOG_END: f32 = 150.0;

#[derive(Component)]
pub struct FollowCamera {
    pub offset: Vec3,
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .add_systems(OnEnter(GameState::Playing), (setup_camera, setup_lighting))
            .add_systems(Update, follow_player.in_set(FrameSet::Presentation));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(FOLLOW_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
            projection: PerspectiveProjection {
                near: 0.1,
                far: 1000.0,
                fov: 75.0_f32.to_radians(),
                ..default()
            }
            .into(),
            ..default()
        },
        FollowCamera {
            offset: FOLLOW_OFFSET,
        },
        FogSettings {
            color: SKY_COLOR,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
    ));
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(50.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

/// Camera position and orientation for an avatar at `target`.
pub fn follow_transform(target: Vec3, offset: Vec3) -> Transform {
    Transform::from_translation(target + offset).looking_at(target, Vec3::Y)
}

fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for (mut transform, follow) in camera_query.iter_mut() {
        *transform = follow_transform(player.translation, follow.offset);
    }
}
