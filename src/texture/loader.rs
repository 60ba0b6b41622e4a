use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::texture::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

pub const GROUND_TEXTURE_PATH: &str = "assets/textures/ground.png";
const PLACEHOLDER_SIZE: u32 = 32;

/// Reads the ground detail texture, or a generated placeholder when the file is unusable.
pub fn load_ground_texture(path: &Path) -> (RgbaImage, bool) {
    match image::open(path) {
        Ok(img) => {
            info!("Loaded ground texture {:?}", path);
            (img.to_rgba8(), true)
        }
        Err(err) => {
            warn!("Failed to load ground texture {:?}: {}; using placeholder", path, err);
            (placeholder_ground(PLACEHOLDER_SIZE), false)
        }
    }
}

/// Light speckled noise so vertex colours still read through.
pub fn placeholder_ground(size: u32) -> RgbaImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        let mut hash = x.wrapping_mul(0x27d4_eb2d) ^ y.wrapping_mul(0x1656_67b1);
        hash ^= hash >> 15;
        hash = hash.wrapping_mul(0x85eb_ca6b);
        hash ^= hash >> 13;
        let shade = 215 + (hash % 41) as u8;
        Rgba([shade, shade, shade, 255])
    })
}

/// Converts to a Bevy image that tiles across the terrain.
pub fn to_repeating_image(rgba: RgbaImage) -> Image {
    let (width, height) = rgba.dimensions();
    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
    image
}
