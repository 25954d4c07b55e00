//! Configuration schema for the application layers.
//!
//! The engine itself needs none of this; the TUI and CLI load one YAML
//! file covering the game, storage, and event-log settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Optional fixed RNG seed; omit for entropy seeding.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Delay in milliseconds between a committed score and the automatic
    /// round reset.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

fn default_reset_delay_ms() -> u64 {
    150
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding saved games.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    /// Save-slot key within that directory.
    #[serde(default = "default_storage_slot")]
    pub slot: String,
}

fn default_storage_dir() -> String {
    "saves".to_string()
}

fn default_storage_slot() -> String {
    "current".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            slot: default_storage_slot(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Optional NDJSON event-log path; omit to disable event logging.
    #[serde(default)]
    pub events_path: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

pub fn validate_config(cfg: &Config) -> Result<(), String> {
    if cfg.game.reset_delay_ms > 10_000 {
        return Err("game.reset_delay_ms must be <= 10000".to_string());
    }
    if cfg.storage.dir.trim().is_empty() {
        return Err("storage.dir must be non-empty".to_string());
    }
    if cfg.storage.slot.trim().is_empty() {
        return Err("storage.slot must be non-empty".to_string());
    }
    Ok(())
}
