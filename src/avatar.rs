use bevy::prelude::*;
use std::f32::consts::PI;

use crate::animation::{Easing, Tween};
use crate::fishing::{FishingNotice, FishingSession};
use crate::input::InputState;
use crate::loading::GameState;
use crate::physics::player::{spawn_position, Player};
use crate::schedule::FrameSet;
use crate::world::{Lakes, TerrainGenerator};

const ROD_REST: f32 = PI / 6.0;
const ROD_CAST: f32 = -PI / 3.0;
const CAST_MS: f64 = 500.0;
const RETRIEVE_MS: f64 = 300.0;
const LINE_LENGTH: f32 = 2.0;
const SWAY_SPEED: f64 = 0.003;
const PULSE_SPEED: f64 = 0.005;
const SWAY_ANGLE: f32 = 0.1;
const BOB_HEIGHT: f32 = 0.2;

/// Idle motion of the line and bait while a session is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMotion {
    pub sway: f32,
    pub bob: f32,
    /// Bait glow in `[0, 1]`.
    pub glow: f32,
}

impl LineMotion {
    pub const STILL: Self = Self {
        sway: 0.0,
        bob: 0.0,
        glow: 0.0,
    };

    pub fn at(now: f64) -> Self {
        let wave = (now * SWAY_SPEED).sin() as f32;
        Self {
            sway: wave * SWAY_ANGLE,
            bob: wave * BOB_HEIGHT,
            glow: ((now * PULSE_SPEED).sin() as f32 + 1.0) * 0.5,
        }
    }

    pub fn emissive(&self) -> LinearRgba {
        LinearRgba::rgb(self.glow * 0.5, 0.0, 0.0)
    }
}

/// Rod swing and line length, sampled every frame.
#[derive(Component)]
pub struct RodRig {
    swing: Tween,
    line_scale: Tween,
}

impl Default for RodRig {
    fn default() -> Self {
        Self {
            swing: Tween::settled(ROD_REST),
            line_scale: Tween::settled(1.0),
        }
    }
}

impl RodRig {
    pub fn on_notice(&mut self, notice: &FishingNotice, now: f64) {
        let swing_now = self.swing.value_at(now);
        let line_now = self.line_scale.value_at(now);
        match notice {
            FishingNotice::Cast => {
                self.swing = Tween::new(now, CAST_MS, swing_now, ROD_CAST, Easing::EaseOutCubic);
                self.line_scale = Tween::new(now, CAST_MS, line_now, 2.0, Easing::Linear);
            }
            FishingNotice::Resolved(_) => {
                self.swing =
                    Tween::new(now, RETRIEVE_MS, swing_now, ROD_REST, Easing::EaseOutCubic);
                self.line_scale = Tween::new(now, RETRIEVE_MS, line_now, 1.0, Easing::Linear);
            }
            FishingNotice::Bite(_) => {}
        }
    }

    /// Line and bait stay out until the retrieve animation has finished.
    pub fn line_visible(&self, session_active: bool, now: f64) -> bool {
        session_active || !self.line_scale.is_complete(now)
    }

    pub fn line_motion(&self, session_active: bool, now: f64) -> LineMotion {
        if session_active {
            LineMotion::at(now)
        } else {
            LineMotion::STILL
        }
    }
}

#[derive(Component)]
struct RodPivot;

#[derive(Component)]
struct LineAnchor;

#[derive(Component)]
struct FishingLine;

#[derive(Component)]
struct Bait;

pub struct AvatarPlugin;

impl Plugin for AvatarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_avatar)
            .add_systems(Update, animate_rod.in_set(FrameSet::Presentation));
    }
}

fn spawn_avatar(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    terrain: Res<TerrainGenerator>,
    lakes: Res<Lakes>,
) {
    let position = spawn_position(&terrain, &lakes);
    info!("Spawning avatar at {:?}", position);

    let shirt = materials.add(Color::srgb(0.20, 0.40, 0.80));
    let skin = materials.add(Color::srgb(0.96, 0.80, 0.69));
    let wood = materials.add(Color::srgb(0.55, 0.35, 0.17));
    let string = materials.add(Color::srgb(0.9, 0.9, 0.9));
    let bobber = materials.add(Color::srgb(0.9, 0.1, 0.1));

    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_translation(position)),
            Player,
            RodRig::default(),
            Name::new("Player"),
        ))
        .with_children(|rig| {
            rig.spawn(PbrBundle {
                mesh: meshes.add(Capsule3d::new(0.35, 0.8)),
                material: shirt,
                ..default()
            });
            rig.spawn(PbrBundle {
                mesh: meshes.add(Sphere::new(0.3)),
                material: skin,
                transform: Transform::from_xyz(0.0, 0.95, 0.0),
                ..default()
            });
            rig.spawn((
                SpatialBundle::from_transform(
                    Transform::from_xyz(0.4, 0.3, 0.2)
                        .with_rotation(Quat::from_rotation_x(ROD_REST)),
                ),
                RodPivot,
            ))
            .with_children(|pivot| {
                pivot.spawn(PbrBundle {
                    mesh: meshes.add(Cylinder::new(0.03, 3.0)),
                    material: wood,
                    transform: Transform::from_xyz(0.0, 1.5, 0.0),
                    ..default()
                });
            });
            rig.spawn((
                SpatialBundle {
                    transform: Transform::from_xyz(0.4, 2.0, 2.0),
                    visibility: Visibility::Hidden,
                    ..default()
                },
                LineAnchor,
            ))
            .with_children(|anchor| {
                anchor.spawn((
                    PbrBundle {
                        mesh: meshes.add(Cylinder::new(0.01, LINE_LENGTH)),
                        material: string,
                        transform: Transform::from_xyz(0.0, -LINE_LENGTH * 0.5, 0.0),
                        ..default()
                    },
                    FishingLine,
                ));
                anchor.spawn((
                    PbrBundle {
                        mesh: meshes.add(Sphere::new(0.1)),
                        material: bobber,
                        transform: Transform::from_xyz(0.0, -LINE_LENGTH, 0.0),
                        ..default()
                    },
                    Bait,
                ));
            });
        });
}

#[allow(clippy::type_complexity, clippy::too_many_arguments)]
fn animate_rod(
    input: Res<InputState>,
    session: Res<FishingSession>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut notices: EventReader<FishingNotice>,
    mut rig_query: Query<&mut RodRig>,
    mut pivot_query: Query<&mut Transform, With<RodPivot>>,
    mut anchor_query: Query<&mut Visibility, With<LineAnchor>>,
    mut line_query: Query<&mut Transform, (With<FishingLine>, Without<RodPivot>, Without<Bait>)>,
    mut bait_query: Query<
        (&mut Transform, &Handle<StandardMaterial>),
        (With<Bait>, Without<RodPivot>, Without<FishingLine>),
    >,
) {
    let now = input.now_ms;
    let Ok(mut rig) = rig_query.get_single_mut() else {
        return;
    };
    for notice in notices.read() {
        rig.on_notice(notice, now);
    }

    let swing = rig.swing.value_at(now);
    for mut pivot in pivot_query.iter_mut() {
        pivot.rotation = Quat::from_rotation_x(swing);
    }

    let active = session.machine.is_active();
    let scale = rig.line_scale.value_at(now);
    let motion = rig.line_motion(active, now);
    for mut line in line_query.iter_mut() {
        line.scale.y = scale;
        line.translation.y = -LINE_LENGTH * scale * 0.5;
        line.rotation = Quat::from_rotation_x(motion.sway);
    }
    for (mut bait, material) in bait_query.iter_mut() {
        bait.translation.y = -LINE_LENGTH * scale + motion.bob;

        let emissive = motion.emissive();
        if materials.get(material).is_some_and(|m| m.emissive != emissive) {
            if let Some(material) = materials.get_mut(material) {
                material.emissive = emissive;
            }
        }
    }

    let visible = rig.line_visible(active, now);
    for mut visibility in anchor_query.iter_mut() {
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
