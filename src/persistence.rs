use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, create_dir_all};
use std::io;
use std::path::{Path, PathBuf};

use crate::inventory::Inventory;
use crate::loading::GameState;
use crate::schedule::FrameSet;

pub const SAVE_PATH: &str = "saves/lakeside.json";

/// Flat snapshot of the player's progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default)]
    pub inventory: BTreeMap<String, u32>,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub fish_count: u64,
    #[serde(default)]
    pub money: u64,
}

impl From<&Inventory> for SaveData {
    fn from(inventory: &Inventory) -> Self {
        Self {
            inventory: inventory.counts().clone(),
            total_points: inventory.total_points(),
            fish_count: inventory.fish_count(),
            money: inventory.money(),
        }
    }
}

impl From<SaveData> for Inventory {
    fn from(data: SaveData) -> Self {
        Inventory::from_parts(data.inventory, data.total_points, data.fish_count, data.money)
    }
}

#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Malformed(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "save file I/O failed: {err}"),
            SaveError::Malformed(err) => write!(f, "save file is malformed: {err}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(err) => Some(err),
            SaveError::Malformed(err) => Some(err),
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::Malformed(err)
    }
}

pub trait SaveStore: Send + Sync + 'static {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>, SaveError>;
    fn store(&self, data: &SaveData) -> Result<(), SaveError>;
}

#[derive(Clone, Debug)]
pub struct DiskSaveStore {
    path: PathBuf,
}

impl DiskSaveStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SaveStore for DiskSaveStore {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn store(&self, data: &SaveData) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Any failure degrades to a fresh start.
pub fn load_or_default(store: &dyn SaveStore) -> SaveData {
    match store.load() {
        Ok(Some(data)) => data,
        Ok(None) => SaveData::default(),
        Err(err) => {
            warn!("Ignoring saved progress: {}", err);
            SaveData::default()
        }
    }
}

#[derive(Resource)]
pub struct SaveSlot(pub Box<dyn SaveStore>);

impl Default for SaveSlot {
    fn default() -> Self {
        Self(Box::new(DiskSaveStore::new(SAVE_PATH)))
    }
}

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveSlot>()
            .add_systems(OnEnter(GameState::Loading), restore_progress)
            .add_systems(Update, save_on_change.in_set(FrameSet::Presentation));
    }
}

fn restore_progress(slot: Res<SaveSlot>, mut inventory: ResMut<Inventory>) {
    let data = load_or_default(slot.0.as_ref());
    info!(
        "Restored progress: {} points, {} fish caught, {} coins",
        data.total_points, data.fish_count, data.money
    );
    *inventory = data.into();
}

fn save_on_change(slot: Res<SaveSlot>, inventory: Res<Inventory>) {
    if !inventory.is_changed() || inventory.is_added() {
        return;
    }
    if let Err(err) = slot.0.store(&SaveData::from(&*inventory)) {
        warn!("Failed to save progress: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        text: Mutex<Option<String>>,
    }

    impl SaveStore for MemoryStore {
        fn load(&self) -> Result<Option<SaveData>, SaveError> {
            let guard = self.text.lock().map_err(|_| io::Error::other("poisoned"))?;
            match guard.as_deref() {
                Some(text) => Ok(Some(serde_json::from_str(text)?)),
                None => Ok(None),
            }
        }

        fn store(&self, data: &SaveData) -> Result<(), SaveError> {
            let text = serde_json::to_string(data)?;
            let mut guard = self.text.lock().map_err(|_| io::Error::other("poisoned"))?;
            *guard = Some(text);
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lakeside-test-{}-{}", std::process::id(), name))
            .join("save.json")
    }

    #[test]
    fn snapshot_uses_flat_camel_case_keys() {
        let mut counts = BTreeMap::new();
        counts.insert("Atum".to_string(), 2);
        let data = SaveData {
            inventory: counts,
            total_points: 40,
            fish_count: 2,
            money: 0,
        };
        let json: serde_json::Value = serde_json::to_value(&data).unwrap();
        assert_eq!(json["inventory"]["Atum"], 2);
        assert_eq!(json["totalPoints"], 40);
        assert_eq!(json["fishCount"], 2);
    }

    #[test]
    fn snapshot_without_money_still_loads() {
        let data: SaveData =
            serde_json::from_str(r#"{"inventory":{"Sardinha":3},"totalPoints":30,"fishCount":3}"#)
                .unwrap();
        assert_eq!(data.money, 0);
        assert_eq!(data.inventory.get("Sardinha"), Some(&3));
    }

    #[test]
    fn malformed_record_resets_to_defaults() {
        let store = MemoryStore {
            text: Mutex::new(Some("{ not json".to_string())),
        };
        assert!(matches!(store.load(), Err(SaveError::Malformed(_))));
        assert_eq!(load_or_default(&store), SaveData::default());
    }

    #[test]
    fn absent_record_is_defaults() {
        assert_eq!(load_or_default(&MemoryStore::default()), SaveData::default());
    }

    #[test]
    fn inventory_round_trips_through_store() {
        let store = MemoryStore::default();
        let mut counts = BTreeMap::new();
        counts.insert("Salmão".to_string(), 1);
        let inventory = Inventory::from_parts(counts, 30, 4, 170);
        store.store(&SaveData::from(&inventory)).unwrap();
        let restored: Inventory = load_or_default(&store).into();
        assert_eq!(restored, inventory);
    }

    #[test]
    fn disk_store_creates_directory_and_reads_back() {
        let path = temp_path("disk");
        let store = DiskSaveStore::new(&path);
        assert!(matches!(store.load(), Ok(None)));

        let data = SaveData {
            total_points: 10,
            fish_count: 1,
            ..SaveData::default()
        };
        store.store(&data).unwrap();
        assert_eq!(store.load().unwrap(), Some(data));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
