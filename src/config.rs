use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fishing::FishingConfig;
use crate::world::WorldGenConfig;

pub const CONFIG_PATH: &str = "config/lakeside.json";

/// Startup overrides. Every field is optional in the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakesideConfig {
    pub world: WorldGenConfig,
    pub fishing: FishingConfig,
}

impl LakesideConfig {
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<LakesideConfig>(contents)
    }

    /// A missing file yields the defaults silently; a malformed one is reported and ignored.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        match Self::parse(&contents) {
            Ok(config) => {
                info!("Loaded configuration overrides from {:?}", path);
                config
            }
            Err(err) => {
                warn!(
                    "Failed to parse config {:?}: {}. Falling back to defaults.",
                    path, err
                );
                Self::default()
            }
        }
    }

    /// Inserts both resources; must run before the plugins that read them at build time.
    pub fn insert_into(self, app: &mut App) {
        app.insert_resource(self.world).insert_resource(self.fishing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ChunkEviction;

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(LakesideConfig::parse("{}").unwrap(), LakesideConfig::default());
    }

    #[test]
    fn nested_overrides_keep_sibling_defaults() {
        let config = LakesideConfig::parse(
            r#"{
                "world": { "seed": 99, "eviction": "Destroy" },
                "fishing": { "tick_period_ms": 32.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.world.eviction, ChunkEviction::Destroy);
        assert_eq!(config.world.chunk_size, WorldGenConfig::default().chunk_size);
        assert_eq!(config.fishing.tick_period_ms, 32.0);
        assert_eq!(
            config.fishing.session_timeout_ms,
            FishingConfig::default().session_timeout_ms
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("lakeside-config-does-not-exist.json");
        let _ = fs::remove_file(&path);
        assert_eq!(LakesideConfig::load(&path), LakesideConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let name = format!("lakeside-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(LakesideConfig::load(&path), LakesideConfig::default());
        let _ = fs::remove_file(&path);
    }
}
