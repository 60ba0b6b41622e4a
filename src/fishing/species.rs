use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct FishSpecies {
    pub name: &'static str,
    /// Scales the oscillation amplitude of the progress bar.
    pub difficulty: f64,
    /// Half-width around 50 in progress points.
    pub catch_window: f64,
    pub points: u64,
    pub price: u64,
    pub glyph: &'static str,
    pub color: u32,
}

impl FishSpecies {
    pub fn display_color(&self) -> Color {
        Color::srgb_u8(
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        )
    }
}

#[derive(Resource, Clone, Debug)]
pub struct FishCatalog {
    species: Vec<FishSpecies>,
}

impl Default for FishCatalog {
    fn default() -> Self {
        Self::new(vec![
            FishSpecies {
                name: "Sardinha",
                difficulty: 0.5,
                catch_window: 15.0,
                points: 10,
                price: 50,
                glyph: "🐟",
                color: 0x87CEEB,
            },
            FishSpecies {
                name: "Atum",
                difficulty: 1.0,
                catch_window: 12.0,
                points: 20,
                price: 120,
                glyph: "🐠",
                color: 0x4169E1,
            },
            FishSpecies {
                name: "Salmão",
                difficulty: 1.5,
                catch_window: 10.0,
                points: 30,
                price: 200,
                glyph: "🐡",
                color: 0xFF6B6B,
            },
        ])
    }
}

impl FishCatalog {
    pub fn new(species: Vec<FishSpecies>) -> Self {
        Self { species }
    }

    pub fn get(&self, name: &str) -> Option<&FishSpecies> {
        self.species.iter().find(|s| s.name == name)
    }

    /// Catalog order, used for the sell hotkeys.
    pub fn by_slot(&self, slot: usize) -> Option<&FishSpecies> {
        self.species.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FishSpecies> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Uniform draw over the catalog.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&FishSpecies> {
        self.species.choose(rng)
    }
}
