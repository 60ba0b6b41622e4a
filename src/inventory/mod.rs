use crate::fishing::{FishCatalog, FishSpecies};
use crate::input::InputState;
use crate::loading::GameState;
use crate::schedule::FrameSet;
use crate::ui::toast::{ToastKind, Toasts};
use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod panel;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>()
            .add_systems(OnEnter(GameState::Playing), panel::setup_inventory_panel)
            .add_systems(Update, sell_fish_system.in_set(FrameSet::Fishing))
            .add_systems(
                Update,
                panel::update_inventory_panel.in_set(FrameSet::Presentation),
            );
    }
}

/// Caught fish by species name plus the running score and wallet.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
    total_points: u64,
    fish_count: u64,
    money: u64,
}

impl Inventory {
    pub fn from_parts(
        counts: BTreeMap<String, u32>,
        total_points: u64,
        fish_count: u64,
        money: u64,
    ) -> Self {
        Self {
            counts,
            total_points,
            fish_count,
            money,
        }
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Lifetime catches, unaffected by selling.
    pub fn fish_count(&self) -> u64 {
        self.fish_count
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    pub fn record_catch(&mut self, species: &FishSpecies) {
        *self.counts.entry(species.name.to_string()).or_insert(0) += 1;
        self.total_points += species.points;
        self.fish_count += 1;
    }

    /// All-or-nothing: fails without touching anything when fewer than `amount` are held.
    pub fn sell_species(&mut self, catalog: &FishCatalog, name: &str, amount: u32) -> bool {
        let Some(species) = catalog.get(name) else {
            return false;
        };
        let held = self.count(name);
        if amount == 0 || amount > held {
            return false;
        }

        self.counts.insert(name.to_string(), held - amount);
        self.money += amount as u64 * species.price;
        true
    }

    /// Sells every fish the catalog prices and returns the money credited.
    pub fn sell_all(&mut self, catalog: &FishCatalog) -> u64 {
        let earned = self.total_value(catalog);
        if earned == 0 {
            return 0;
        }

        for species in catalog.iter() {
            if let Some(count) = self.counts.get_mut(species.name) {
                *count = 0;
            }
        }
        self.money += earned;
        earned
    }

    pub fn total_value(&self, catalog: &FishCatalog) -> u64 {
        catalog
            .iter()
            .map(|species| self.count(species.name) as u64 * species.price)
            .sum()
    }
}

fn sell_fish_system(
    input: Res<InputState>,
    catalog: Res<FishCatalog>,
    mut inventory: ResMut<Inventory>,
    mut toasts: ResMut<Toasts>,
) {
    if let Some(slot) = input.sell_slot {
        let Some(species) = catalog.by_slot(slot) else {
            return;
        };
        if inventory.sell_species(&catalog, species.name, 1) {
            info!("Sold one {} for {}", species.name, species.price);
            toasts.show(
                format!("Vendeu 1x {} por {} moedas", species.name, species.price),
                ToastKind::Sale,
                input.now_ms,
            );
        } else {
            toasts.show(
                format!("Nenhum {} para vender", species.name),
                ToastKind::Failure,
                input.now_ms,
            );
        }
    }

    if input.sell_all {
        let earned = inventory.sell_all(&catalog);
        if earned > 0 {
            info!("Sold the whole catch for {}", earned);
            toasts.show(
                format!("Vendeu todo o inventário por {} moedas", earned),
                ToastKind::Sale,
                input.now_ms,
            );
        } else {
            toasts.show("Inventário vazio", ToastKind::Failure, input.now_ms);
        }
    }
}
