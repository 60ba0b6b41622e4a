use bevy::prelude::*;

use crate::fishing::FishingSession;

const CATCHABLE_COLOR: Color = Color::srgb(0.298, 0.686, 0.314);
const MISS_COLOR: Color = Color::srgb(1.0, 0.420, 0.420);

#[derive(Component)]
pub struct FishingBar;

#[derive(Component)]
pub struct FishingBarFill;

/// Fill width in percent and colour, or `None` when no fish is on the line.
pub fn bar_fill(bar: Option<(f64, bool)>) -> Option<(f32, Color)> {
    bar.map(|(progress, catchable)| {
        let color = if catchable { CATCHABLE_COLOR } else { MISS_COLOR };
        (progress.clamp(0.0, 100.0) as f32, color)
    })
}

pub fn setup_fishing_bar(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(60.0),
                    left: Val::Percent(50.0),
                    width: Val::Px(300.0),
                    height: Val::Px(20.0),
                    margin: UiRect::left(Val::Px(-150.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                background_color: BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.8)),
                border_color: BorderColor(Color::WHITE),
                visibility: Visibility::Hidden,
                ..default()
            },
            FishingBar,
        ))
        .with_children(|bar| {
            bar.spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Percent(50.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    background_color: BackgroundColor(CATCHABLE_COLOR),
                    ..default()
                },
                FishingBarFill,
            ));
        });
}

pub fn update_fishing_bar(
    session: Res<FishingSession>,
    mut bar_query: Query<&mut Visibility, With<FishingBar>>,
    mut fill_query: Query<(&mut Style, &mut BackgroundColor), With<FishingBarFill>>,
) {
    let fill = bar_fill(session.machine.bar());

    for mut visibility in bar_query.iter_mut() {
        *visibility = if fill.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let Some((width, color)) = fill else {
        return;
    };
    for (mut style, mut background) in fill_query.iter_mut() {
        style.width = Val::Percent(width);
        background.0 = color;
    }
}
