use bevy::prelude::*;

use crate::fishing::FishingConfig;
use crate::schedule::FrameSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_systems(Startup, init_cast_debounce)
            .add_systems(Update, poll_input.in_set(FrameSet::Input))
            .add_systems(Update, exit_system);
    }
}

/// Minimum spacing between two activations of an action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debounce {
    interval_ms: f64,
    last_fired: Option<f64>,
}

impl Debounce {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_fired: None,
        }
    }

    /// Fires and restarts the interval, or refuses while still cooling down.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_fired {
            if now - last < self.interval_ms {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }
}

#[derive(Resource)]
struct CastDebounce(Debounce);

/// Everything gameplay reads from the keyboard, written once per frame.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Edge: start a cast or pull the line back in.
    pub cast_retrieve: bool,
    pub catch: bool,
    /// Edge: sell one fish from this catalog slot.
    pub sell_slot: Option<usize>,
    pub sell_all: bool,
    /// Frame timestamp in milliseconds since startup.
    pub now_ms: f64,
}

impl InputState {
    /// Ground-plane direction, x to the right and y towards the camera (+z).
    pub fn movement(&self) -> Vec2 {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.right, self.left), axis(self.back, self.forward))
    }
}

const SELL_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

fn init_cast_debounce(mut commands: Commands, config: Option<Res<FishingConfig>>) {
    let interval = config
        .map(|config| config.cast_debounce_ms)
        .unwrap_or(crate::fishing::config::CAST_DEBOUNCE_MS);
    commands.insert_resource(CastDebounce(Debounce::new(interval)));
}

fn poll_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut debounce: ResMut<CastDebounce>,
    mut input: ResMut<InputState>,
) {
    let now = time.elapsed_seconds_f64() * 1000.0;
    let held = |keys: [KeyCode; 2]| keys.iter().any(|key| keyboard.pressed(*key));

    *input = InputState {
        forward: held([KeyCode::KeyW, KeyCode::ArrowUp]),
        back: held([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: held([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: held([KeyCode::KeyD, KeyCode::ArrowRight]),
        cast_retrieve: keyboard.just_pressed(KeyCode::Space) && debounce.0.try_fire(now),
        catch: keyboard.just_pressed(KeyCode::KeyF),
        sell_slot: SELL_KEYS.iter().position(|key| keyboard.just_pressed(*key)),
        sell_all: keyboard.just_pressed(KeyCode::KeyV),
        now_ms: now,
    };
}

fn exit_system(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.pressed(KeyCode::ControlLeft) && keyboard.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}
