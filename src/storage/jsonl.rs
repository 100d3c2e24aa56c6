//! JSONL play log backend.
//!
//! One JSON object per line. Chosen over CSV when the log is consumed by
//! scripts rather than spreadsheets.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::warn;

use super::StorageError;
use crate::models::PlayRecord;

/// Read every play from the JSONL file. A missing file is an empty log;
/// unparseable lines are skipped with a warning.
pub fn read_plays(path: &Path) -> Result<Vec<PlayRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut plays = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayRecord>(&line) {
            Ok(play) => plays.push(play),
            Err(err) => {
                warn!(path = %path.display(), line = index + 1, error = %err, "skipping malformed JSONL line");
            }
        }
    }
    Ok(plays)
}

/// Append one play as a single JSON line.
pub fn append_play(path: &Path, play: &PlayRecord) -> Result<(), StorageError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let line = serde_json::to_string(play)?;
    writeln!(file, "{}", line).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Rewrite the full log.
pub fn write_plays(path: &Path, plays: &[PlayRecord]) -> Result<(), StorageError> {
    let mut file = File::create(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    for play in plays {
        let line = serde_json::to_string(play)?;
        writeln!(file, "{}", line).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
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
            game: "2026-09-19".to_string(),
            opponent: "Lions".to_string(),
            team_side: TeamSide::Defense,
            quarter: 4,
            down: 2,
            distance: 6.0,
            yard_line: 20,
            hash: HashMark::Middle,
            formation: "Gun Empty".to_string(),
            personnel: "00".to_string(),
            play_type: "Pass".to_string(),
            result_yards: 3.0,
            notes: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plays.jsonl");
        let play = sample_play();
        append_play(&path, &play).unwrap();
        append_play(&path, &play).unwrap();

        let loaded = read_plays(&path).unwrap();
        assert_eq!(loaded, vec![play.clone(), play]);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plays.jsonl");
        append_play(&path, &sample_play()).unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();
        append_play(&path, &sample_play()).unwrap();

        assert_eq!(read_plays(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_plays(&dir.path().join("nope.jsonl")).unwrap().is_empty());
    }

    #[test]
    fn test_write_plays_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plays.jsonl");
        append_play(&path, &sample_play()).unwrap();
        write_plays(&path, &[]).unwrap();
        assert!(read_plays(&path).unwrap().is_empty());
    }
}
