use bevy::prelude::*;

use crate::chunk::{ChunkManager, ChunkPos};
use crate::loading::GameState;
use crate::physics::Player;
use crate::schedule::FrameSet;
use crate::world::WorldGenConfig;

#[derive(Component)]
struct HudText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(Update, update_hud.in_set(FrameSet::Presentation));
    }
}

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_sections([
            TextSection::new(
                "",
                TextStyle {
                    font_size: 16.0,
                    color: Color::WHITE,
                    ..default()
                },
            ),
            TextSection::new(
                "\nWASD mover | Espaço lançar/recolher | F fisgar | 1-3 vender | V vender tudo",
                TextStyle {
                    font_size: 13.0,
                    color: Color::srgb(0.85, 0.85, 0.85),
                    ..default()
                },
            ),
        ])
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        HudText,
    ));
}

fn update_hud(
    config: Res<WorldGenConfig>,
    chunks: Res<ChunkManager>,
    player_query: Query<&Transform, With<Player>>,
    mut text_query: Query<&mut Text, With<HudText>>,
) {
    let Ok(transform) = player_query.get_single() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let position = transform.translation;
    let chunk = ChunkPos::from_world_pos(position, config.chunk_size);
    let biome = chunks
        .chunk(chunk)
        .map(|data| data.terrain.biome_near(position.x, position.z).name())
        .unwrap_or("-");

    text.sections[0].value = format!(
        "Posição: {:.1}, {:.1}\nChunk: {} ({} visíveis)\nBioma: {}",
        position.x,
        position.z,
        chunk,
        chunks.visible_count(),
        biome
    );
}
