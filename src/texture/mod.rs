pub mod loader;

use bevy::prelude::*;
use std::path::Path;

/// Detail texture modulated by the terrain's vertex colours.
#[derive(Resource)]
pub struct GroundTexture {
    pub image: Handle<Image>,
}

pub struct TexturePlugin;

impl Plugin for TexturePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_textures);
    }
}

fn setup_textures(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    info!("Setting up texture system...");

    let (rgba, from_disk) = loader::load_ground_texture(Path::new(loader::GROUND_TEXTURE_PATH));
    let handle = images.add(loader::to_repeating_image(rgba));
    if !from_disk {
        debug!("Ground texture is the generated placeholder");
    }
    commands.insert_resource(GroundTexture { image: handle });
}
