use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::InputState;
use crate::inventory::Inventory;
use crate::schedule::FrameSet;
use crate::ui::toast::{ToastKind, Toasts};

pub mod config;
pub mod species;
pub mod state;

pub use config::FishingConfig;
pub use species::{FishCatalog, FishSpecies};
pub use state::{FishingEvent, FishingOutcome, FishingPhase, FishingStateMachine};

/// Broadcast to presentation systems (rod rig, toasts).
#[derive(Event, Clone, Debug, PartialEq)]
pub enum FishingNotice {
    Cast,
    Bite(FishSpecies),
    Resolved(FishingOutcome),
}

#[derive(Resource)]
pub struct FishingSession {
    pub machine: FishingStateMachine,
    rng: StdRng,
}

impl FromWorld for FishingSession {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<FishingConfig>()
            .cloned()
            .unwrap_or_default();
        Self {
            machine: FishingStateMachine::new(config),
            rng: StdRng::from_entropy(),
        }
    }
}

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        info!("FishingPlugin initializing");
        app.init_resource::<FishCatalog>()
            .init_resource::<FishingSession>()
            .add_event::<FishingNotice>()
            .add_systems(
                Update,
                (drive_fishing, announce_fishing)
                    .chain()
                    .in_set(FrameSet::Fishing),
            );
    }
}

fn drive_fishing(
    input: Res<InputState>,
    catalog: Res<FishCatalog>,
    mut session: ResMut<FishingSession>,
    mut inventory: ResMut<Inventory>,
    mut notices: EventWriter<FishingNotice>,
) {
    let now = input.now_ms;
    let FishingSession { machine, rng } = &mut *session;

    match machine.update(now, &catalog, rng) {
        Some(FishingEvent::Bite(species)) => {
            info!("{} is biting", species.name);
            notices.send(FishingNotice::Bite(species));
        }
        Some(FishingEvent::Resolved(outcome)) => {
            info!("Fishing session ended: {:?}", outcome);
            notices.send(FishingNotice::Resolved(outcome));
        }
        None => {}
    }

    if input.cast_retrieve {
        if machine.is_active() {
            if let Some(outcome) = machine.retrieve() {
                info!("Line retrieved");
                notices.send(FishingNotice::Resolved(outcome));
            }
        } else if machine.cast(now, rng) {
            info!("Line cast");
            notices.send(FishingNotice::Cast);
        }
    }

    if input.catch {
        if let Some(outcome) = machine.catch(now, &mut inventory) {
            info!("Catch attempt: {:?}", outcome);
            notices.send(FishingNotice::Resolved(outcome));
        }
    }
}

pub fn notice_message(notice: &FishingNotice) -> (String, ToastKind) {
    match notice {
        FishingNotice::Cast => ("Vara lançada! Aguarde um peixe...".into(), ToastKind::Info),
        FishingNotice::Bite(_) => (
            "Um peixe mordeu! Pressione F quando a barra estiver verde!".into(),
            ToastKind::Bite,
        ),
        FishingNotice::Resolved(outcome) => match outcome {
            FishingOutcome::Caught(species) => (
                format!("Pegou um {}! +{} pontos", species.name, species.points),
                ToastKind::Success,
            ),
            FishingOutcome::Escaped(_) => {
                ("O peixe escapou! Timing errado!".into(), ToastKind::Failure)
            }
            FishingOutcome::Missed => ("Puxou cedo demais!".into(), ToastKind::Failure),
            FishingOutcome::Timeout => ("Tempo esgotado!".into(), ToastKind::Failure),
            FishingOutcome::ManualRetrieve => ("Linha recolhida.".into(), ToastKind::Info),
        },
    }
}

fn announce_fishing(
    input: Res<InputState>,
    mut notices: EventReader<FishingNotice>,
    mut toasts: ResMut<Toasts>,
) {
    for notice in notices.read() {
        let (text, kind) = notice_message(notice);
        toasts.show(text, kind, input.now_ms);
    }
}
