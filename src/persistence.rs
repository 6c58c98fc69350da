//! High-score persistence: a single `{"high_score": n}` JSON record.
//!
//! Reads and writes are best-effort. A missing or malformed file reads as 0
//! and a failed write is logged and dropped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u32,
}

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<HighScoreRecord> {
        let text = fs::read_to_string(&self.path).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GameError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn try_save(&self, high_score: u32) -> Result<()> {
        let record = HighScoreRecord { high_score };
        let text = serde_json::to_string(&record).map_err(|source| GameError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Stored high score, or 0 when there is nothing usable on disk.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(record) => record.high_score,
            Err(GameError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                0
            }
            Err(err) => {
                tracing::warn!("high score unreadable, starting from 0: {err}");
                0
            }
        }
    }

    pub fn save(&self, high_score: u32) {
        if let Err(err) = self.try_save(high_score) {
            tracing::warn!("high score not saved: {err}");
        }
    }
}
