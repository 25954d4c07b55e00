//! yacht-log: append-only NDJSON log of game events.
//!
//! One JSON object per line, append-only, for post-mortems and play
//! analysis. Writing is best-effort by convention: the presentation layer
//! treats a failed append as a dropped line, never as a game error.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// One line of the game event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStart {
        ts_ms: u64,
    },
    Roll {
        ts_ms: u64,
        rolls_used: u8,
        faces: [u8; 5],
    },
    HoldToggled {
        ts_ms: u64,
        die: usize,
        held: bool,
    },
    HoldsCleared {
        ts_ms: u64,
    },
    Commit {
        ts_ms: u64,
        category: String,
        value: i32,
        total: i32,
    },
    Reset {
        ts_ms: u64,
    },
    GameOver {
        ts_ms: u64,
        total: i32,
    },
}

#[derive(Debug)]
pub enum LogError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for LogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only event log.
///
/// Contract: each append writes exactly one JSON object followed by a
/// newline.
pub struct EventLog {
    w: BufWriter<File>,
}

impl EventLog {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
        })
    }

    pub fn append(&mut self, event: &GameEvent) -> Result<(), LogError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.w.flush()?;
        Ok(())
    }
}

/// Lenient reader for analysis and tests: skips blank lines and anything
/// that does not parse (a trailing partial line after a crash included).
pub fn read_events_lenient(path: impl AsRef<Path>) -> Vec<GameEvent> {
    let Ok(s) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for line in s.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(ev) = serde_json::from_str::<GameEvent>(line) {
            out.push(ev);
        }
    }
    out
}
