//! yacht-store: persistence capability for game snapshots.
//!
//! Storage is an injected capability: the engine never touches it, and the
//! presentation layer hands snapshots across this boundary. Loading is
//! lenient by contract: a missing, unreadable, or unusable snapshot reads
//! as "no prior state", never as a fatal error.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use yacht_core::{Category, Dice, Die, GameSession, ScoreSheet, DICE_COUNT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieSnapshot {
    pub value: u8,
    pub held: bool,
}

/// Serializable image of a session: dice, rolls used, recorded scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotV1 {
    pub snapshot_version: u32,
    pub dice: [DieSnapshot; DICE_COUNT],
    pub rolls_used: u8,
    /// Filled categories only, keyed by stable category name.
    pub scores: BTreeMap<String, i32>,
}

impl SnapshotV1 {
    /// Capture the persistent parts of a session.
    pub fn capture(session: &GameSession) -> Self {
        let dice = session.dice().map(|d| DieSnapshot {
            value: d.value,
            held: d.held,
        });
        let mut scores = BTreeMap::new();
        for (cat, slot) in session.sheet().entries() {
            if let Some(value) = slot {
                scores.insert(cat.name().to_string(), value);
            }
        }
        Self {
            snapshot_version: SNAPSHOT_VERSION,
            dice,
            rolls_used: session.rolls_used(),
            scores,
        }
    }

    /// Rebuild a session. `None` for unusable snapshots: wrong version,
    /// out-of-range fields, or unknown category names.
    pub fn restore(&self) -> Option<GameSession> {
        if self.snapshot_version != SNAPSHOT_VERSION {
            return None;
        }
        let mut sheet = ScoreSheet::new();
        for (name, &value) in &self.scores {
            let cat = Category::from_name(name)?;
            if !sheet.record(cat, value) {
                return None;
            }
        }
        let dice: Dice = self.dice.map(|d| Die {
            value: d.value,
            held: d.held,
        });
        GameSession::resume(dice, self.rolls_used, sheet)
    }
}

/// Load/save capability handed to the presentation layer.
pub trait Storage {
    /// `Ok(None)` covers both "never saved" and "saved but unusable".
    fn load(&self, key: &str) -> Result<Option<SnapshotV1>, StoreError>;
    fn save(&mut self, key: &str, snapshot: &SnapshotV1) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, SnapshotV1>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<SnapshotV1>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, snapshot: &SnapshotV1) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), snapshot.clone());
        Ok(())
    }
}

/// One JSON file per key under a root directory. Saves go through a
/// `.tmp` file and a rename so a crash never leaves a torn snapshot.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        // Sanitize the key for the filesystem.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{sanitized}.json"))
    }
}

impl Storage for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<SnapshotV1>, StoreError> {
        let path = self.slot_path(key);
        let Ok(bytes) = fs::read(&path) else {
            return Ok(None);
        };
        match serde_json::from_slice::<SnapshotV1>(&bytes) {
            Ok(snap) if snap.snapshot_version == SNAPSHOT_VERSION => Ok(Some(snap)),
            _ => Ok(None),
        }
    }

    fn save(&mut self, key: &str, snapshot: &SnapshotV1) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Load through `storage`, falling back to a fresh session on any miss or
/// failure. `seed` fixes the dice stream of the fallback session.
pub fn load_or_fresh(storage: &dyn Storage, key: &str, seed: Option<u64>) -> GameSession {
    if let Ok(Some(snapshot)) = storage.load(key) {
        if let Some(session) = snapshot.restore() {
            return session;
        }
    }
    match seed {
        Some(s) => GameSession::with_seed(s),
        None => GameSession::new(),
    }
}
