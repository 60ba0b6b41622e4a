pub mod fishing_bar;
mod hud;
pub mod toast;

use bevy::prelude::*;
use hud::HudPlugin;

use crate::loading::GameState;
use crate::schedule::FrameSet;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<toast::Toasts>()
            .add_plugins(HudPlugin)
            .add_systems(
                OnEnter(GameState::Playing),
                (toast::setup_toast_banner, fishing_bar::setup_fishing_bar),
            )
            .add_systems(
                Update,
                (toast::update_toast_banner, fishing_bar::update_fishing_bar)
                    .in_set(FrameSet::Presentation),
            );
    }
}
