use bevy::prelude::*;

use super::Inventory;
use crate::fishing::FishCatalog;

#[derive(Component)]
pub struct InventoryPanel;

#[derive(Component)]
pub struct InventoryRow {
    pub slot: usize,
}

#[derive(Component)]
pub struct InventoryTotals;

pub fn setup_inventory_panel(mut commands: Commands, catalog: Res<FishCatalog>) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(10.0),
                    right: Val::Px(10.0),
                    width: Val::Px(260.0),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(8.0)),
                    row_gap: Val::Px(4.0),
                    ..default()
                },
                background_color: BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                ..default()
            },
            InventoryPanel,
        ))
        .with_children(|panel| {
            panel.spawn(TextBundle::from_section(
                "Inventário",
                TextStyle {
                    font_size: 18.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));

            for (slot, species) in catalog.iter().enumerate() {
                panel
                    .spawn(NodeBundle {
                        style: Style {
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(6.0),
                            ..default()
                        },
                        ..default()
                    })
                    .with_children(|row| {
                        // Species swatch stands in for the icon
                        row.spawn(NodeBundle {
                            style: Style {
                                width: Val::Px(14.0),
                                height: Val::Px(14.0),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            background_color: BackgroundColor(species.display_color()),
                            border_color: BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
                            ..default()
                        });
                        row.spawn((
                            TextBundle::from_section(
                                "",
                                TextStyle {
                                    font_size: 14.0,
                                    color: Color::WHITE,
                                    ..default()
                                },
                            ),
                            InventoryRow { slot },
                        ));
                    });
            }

            panel.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 14.0,
                        color: Color::srgb(1.0, 0.84, 0.0),
                        ..default()
                    },
                ),
                InventoryTotals,
            ));
        });
}

pub fn row_label(slot: usize, name: &str, count: u32, price: u64) -> String {
    format!("[{}] {}: {} ({} cada)", slot + 1, name, count, price)
}

pub fn totals_label(inventory: &Inventory, catalog: &FishCatalog) -> String {
    format!(
        "Valor: {}  [V] vender tudo\nPontos: {}\nMoedas: {}\nPeixes pescados: {}",
        inventory.total_value(catalog),
        inventory.total_points(),
        inventory.money(),
        inventory.fish_count()
    )
}

pub fn update_inventory_panel(
    inventory: Res<Inventory>,
    catalog: Res<FishCatalog>,
    mut row_query: Query<(&InventoryRow, &mut Text), Without<InventoryTotals>>,
    mut totals_query: Query<&mut Text, With<InventoryTotals>>,
) {
    for (row, mut text) in row_query.iter_mut() {
        if let Some(species) = catalog.by_slot(row.slot) {
            text.sections[0].value =
                row_label(row.slot, species.name, inventory.count(species.name), species.price);
        }
    }

    if let Ok(mut text) = totals_query.get_single_mut() {
        text.sections[0].value = totals_label(&inventory, &catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_show_counts_prices_and_totals() {
        assert_eq!(row_label(1, "Atum", 2, 120), "[2] Atum: 2 (120 cada)");

        let catalog = FishCatalog::default();
        let mut inventory = Inventory::default();
        if let Some(species) = catalog.get("Sardinha").cloned() {
            inventory.record_catch(&species);
        }
        let totals = totals_label(&inventory, &catalog);
        assert!(totals.contains("Valor: 50"));
        assert!(totals.contains("Pontos: 10"));
        assert!(totals.contains("Peixes pescados: 1"));
    }
}
