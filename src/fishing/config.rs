use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

pub const BITE_DELAY_MIN_MS: f64 = 1000.0;
pub const BITE_DELAY_MAX_MS: f64 = 3000.0;
pub const TICK_PERIOD_MS: f64 = 16.0;
pub const OSCILLATION_SPEED: f64 = 0.003;
pub const OSCILLATION_AMPLITUDE: f64 = 25.0;
pub const SESSION_TIMEOUT_MS: f64 = 20000.0;
pub const CAST_DEBOUNCE_MS: f64 = 500.0;

/// Timing of the fishing minigame. All durations are milliseconds.
#[derive(Resource, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FishingConfig {
    pub bite_delay_min_ms: f64,
    pub bite_delay_max_ms: f64,
    pub tick_period_ms: f64,
    pub oscillation_speed: f64,
    pub oscillation_amplitude: f64,
    pub session_timeout_ms: f64,
    pub cast_debounce_ms: f64,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            bite_delay_min_ms: BITE_DELAY_MIN_MS,
            bite_delay_max_ms: BITE_DELAY_MAX_MS,
            tick_period_ms: TICK_PERIOD_MS,
            oscillation_speed: OSCILLATION_SPEED,
            oscillation_amplitude: OSCILLATION_AMPLITUDE,
            session_timeout_ms: SESSION_TIMEOUT_MS,
            cast_debounce_ms: CAST_DEBOUNCE_MS,
        }
    }
}
