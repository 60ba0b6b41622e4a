use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::PresentMode;
use std::path::Path;

mod animation;
mod avatar;
mod camera;
mod chunk;
mod config;
mod fishing;
mod input;
mod inventory;
mod loading;
mod persistence;
mod physics;
mod schedule;
mod texture;
mod ui;
mod world;

use avatar::AvatarPlugin;
use camera::CameraPlugin;
use chunk::ChunkPlugin;
use config::{LakesideConfig, CONFIG_PATH};
use fishing::FishingPlugin;
use input::InputPlugin;
use inventory::InventoryPlugin;
use loading::LoadingPlugin;
use persistence::PersistencePlugin;
use physics::PhysicsPlugin;
use schedule::SchedulePlugin;
use texture::TexturePlugin;
use ui::UIPlugin;
use world::WorldPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Lakeside".into(),
                    resolution: (1280., 720.).into(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,wgpu=error,naga=warn".into(),
                level: Level::INFO,
                ..default()
            }),
    );

    // World and fishing plugins read their configuration while building
    LakesideConfig::load(Path::new(CONFIG_PATH)).insert_into(&mut app);

    app.add_plugins((
        LoadingPlugin, // Owns GameState, so it goes first
        SchedulePlugin,
        TexturePlugin,
        WorldPlugin, // Before ChunkPlugin since chunks depend on world gen
        ChunkPlugin,
        PhysicsPlugin,
        InputPlugin,
        FishingPlugin,
        InventoryPlugin,
        PersistencePlugin,
    ))
    .add_plugins((CameraPlugin, AvatarPlugin, UIPlugin))
    .run();
}
