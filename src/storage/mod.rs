//! Flat-file play storage.
//!
//! Plays live in one human-editable file under the data directory:
//! a CSV spreadsheet by default (openable in any sheet tool) or a JSONL
//! file as the alternate backend. Appends are the hot path; full rewrites
//! happen only on admin reset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::models::PlayRecord;

pub mod csv;
pub mod jsonl;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which file format backs the play log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Csv,
    Jsonl,
}

/// Where and how plays are persisted.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Csv,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StoreConfig {
    /// Path of the play log file for the configured backend.
    pub fn plays_path(&self) -> PathBuf {
        match self.backend {
            StoreBackend::Csv => self.data_dir.join("plays.csv"),
            StoreBackend::Jsonl => self.data_dir.join("plays.jsonl"),
        }
    }

    /// Directory holding formation diagram images.
    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir.join("assets")
    }
}

/// Handle over the play log file. Stateless; every read goes to disk.
#[derive(Debug, Clone)]
pub struct PlayStore {
    config: StoreConfig,
}

impl PlayStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load every play on record. A missing file means an empty log, not
    /// an error. Rows whose stored success flag disagrees with a fresh
    /// recompute are kept but flagged in the log.
    pub fn load(&self) -> Result<Vec<PlayRecord>, StorageError> {
        let path = self.config.plays_path();
        let plays = match self.config.backend {
            StoreBackend::Csv => csv::read_plays(&path)?,
            StoreBackend::Jsonl => jsonl::read_plays(&path)?,
        };

        for (index, play) in plays.iter().enumerate() {
            match play.recompute_success() {
                Ok(expected) if expected != play.success => {
                    warn!(
                        row = index + 1,
                        stored = play.success,
                        expected,
                        "stored success flag disagrees with recompute"
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(row = index + 1, error = %err, "stored play fails validation");
                }
            }
        }

        Ok(plays)
    }

    /// Append one play to the log, creating the file (and data directory)
    /// on first use.
    pub fn append(&self, play: &PlayRecord) -> Result<(), StorageError> {
        let path = self.config.plays_path();
        ensure_parent_dir(&path)?;
        match self.config.backend {
            StoreBackend::Csv => csv::append_play(&path, play),
            StoreBackend::Jsonl => jsonl::append_play(&path, play),
        }
    }

    /// Replace the entire log. Used by admin reset.
    pub fn overwrite(&self, plays: &[PlayRecord]) -> Result<(), StorageError> {
        let path = self.config.plays_path();
        ensure_parent_dir(&path)?;
        match self.config.backend {
            StoreBackend::Csv => csv::write_plays(&path, plays),
            StoreBackend::Jsonl => jsonl::write_plays(&path, plays),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HashMark, PlayDraft, TeamSide};

    fn sample_play() -> PlayRecord {
        PlayRecord::from_draft(PlayDraft {
            game: "2026-09-05".to_string(),
            opponent: "Eagles".to_string(),
            team_side: TeamSide::Offense,
            quarter: 1,
            down: 1,
            distance: 10.0,
            yard_line: 35,
            hash: HashMark::Left,
            formation: "Ace".to_string(),
            personnel: "11".to_string(),
            play_type: "Run".to_string(),
            result_yards: 6.0,
            notes: "counter left".to_string(),
        })
        .unwrap()
    }

    fn store(dir: &Path, backend: StoreBackend) -> PlayStore {
        PlayStore::new(StoreConfig {
            backend,
            data_dir: dir.to_path_buf(),
        })
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        for backend in [StoreBackend::Csv, StoreBackend::Jsonl] {
            assert!(store(dir.path(), backend).load().unwrap().is_empty());
        }
    }

    #[test]
    fn test_append_then_load_round_trip_csv() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), StoreBackend::Csv);
        let play = sample_play();
        store.append(&play).unwrap();
        store.append(&play).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].opponent, "Eagles");
        assert_eq!(loaded[0].result_yards, 6.0);
        assert!(loaded[0].success);
    }

    #[test]
    fn test_append_then_load_round_trip_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), StoreBackend::Jsonl);
        let play = sample_play();
        store.append(&play).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![play]);
    }

    #[test]
    fn test_overwrite_empty_resets_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), StoreBackend::Csv);
        store.append(&sample_play()).unwrap();
        store.overwrite(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_after_reset_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        for backend in [StoreBackend::Csv, StoreBackend::Jsonl] {
            let store = store(dir.path(), backend);
            store.append(&sample_play()).unwrap();
            store.overwrite(&[]).unwrap();

            store.append(&sample_play()).unwrap();
            store.append(&sample_play()).unwrap();
            assert_eq!(store.load().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_plays_path_per_backend() {
        let config = StoreConfig {
            backend: StoreBackend::Jsonl,
            data_dir: PathBuf::from("/tmp/x"),
        };
        assert_eq!(config.plays_path(), PathBuf::from("/tmp/x/plays.jsonl"));
        assert_eq!(config.assets_dir(), PathBuf::from("/tmp/x/assets"));
    }
}
