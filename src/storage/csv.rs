//! CSV play log backend.
//!
//! The on-disk schema is a flat spreadsheet with PascalCase headers so the
//! file stays directly usable in sheet tools. The JSON API keeps snake_case;
//! `CsvRow` is the bridge between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::warn;

use super::StorageError;
use crate::models::{HashMark, PlayRecord, TeamSide};

/// One spreadsheet row. Column order matters: it is the order coaches see
/// when they open the file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    timestamp: DateTime<Utc>,
    game: String,
    opponent: String,
    team_side: TeamSide,
    quarter: u8,
    down: u8,
    distance: f64,
    yard_line: u8,
    hash: HashMark,
    formation: String,
    personnel: String,
    play_type: String,
    result_yards: f64,
    success: bool,
    notes: String,
}

impl From<&PlayRecord> for CsvRow {
    fn from(play: &PlayRecord) -> Self {
        Self {
            timestamp: play.timestamp,
            game: play.game.clone(),
            opponent: play.opponent.clone(),
            team_side: play.team_side,
            quarter: play.quarter,
            down: play.down,
            distance: play.distance,
            yard_line: play.yard_line,
            hash: play.hash,
            formation: play.formation.clone(),
            personnel: play.personnel.clone(),
            play_type: play.play_type.clone(),
            result_yards: play.result_yards,
            success: play.success,
            notes: play.notes.clone(),
        }
    }
}

impl From<CsvRow> for PlayRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            timestamp: row.timestamp,
            game: row.game,
            opponent: row.opponent,
            team_side: row.team_side,
            quarter: row.quarter,
            down: row.down,
            distance: row.distance,
            yard_line: row.yard_line,
            hash: row.hash,
            formation: row.formation,
            personnel: row.personnel,
            play_type: row.play_type,
            result_yards: row.result_yards,
            success: row.success,
            notes: row.notes,
        }
    }
}

/// Read every play from the CSV file. A missing file is an empty log.
/// Rows that fail to parse are skipped with a warning so one hand-edited
/// bad line never takes the whole log down.
pub fn read_plays(path: &Path) -> Result<Vec<PlayRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ::csv::Reader::from_path(path)?;
    let mut plays = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        match result {
            Ok(row) => plays.push(PlayRecord::from(row)),
            Err(err) => {
                warn!(path = %path.display(), row = index + 1, error = %err, "skipping malformed CSV row");
            }
        }
    }
    Ok(plays)
}

/// Append one play, writing the header row only when the file is new or
/// empty. A reset leaves a zero-byte file behind, so size is the test,
/// not existence: appending a headerless data row to an empty file would
/// make the reader eat it as the header line.
pub fn append_play(path: &Path, play: &PlayRecord) -> Result<(), StorageError> {
    let write_headers = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(write_headers)
        .from_writer(file);
    writer.serialize(CsvRow::from(play))?;
    writer.flush().map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Rewrite the full log.
pub fn write_plays(path: &Path, plays: &[PlayRecord]) -> Result<(), StorageError> {
    let mut writer = ::csv::Writer::from_path(path)?;
    for play in plays {
        writer.serialize(CsvRow::from(play))?;
    }
    writer.flush().map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Render the plays as a CSV document in memory, for the export endpoint.
pub fn render_csv(plays: &[PlayRecord]) -> Result<String, StorageError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    for play in plays {
        writer.serialize(CsvRow::from(play))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| StorageError::Io {
            path: Path::new("<memory>").to_path_buf(),
            source: err.into_error(),
        })?;
    // The writer only ever receives UTF-8 serialized fields.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
