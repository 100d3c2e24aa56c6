//! Play record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::classify::{self, ClassifyError};

/// Which side of the ball the logged unit was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSide {
    Offense,
    Defense,
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::Offense => write!(f, "Offense"),
            TeamSide::Defense => write!(f, "Defense"),
        }
    }
}

impl FromStr for TeamSide {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offense" => Ok(TeamSide::Offense),
            "defense" => Ok(TeamSide::Defense),
            _ => Err(PlayError::InvalidTeamSide(s.to_string())),
        }
    }
}

/// Lateral field position of the snap. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashMark {
    Left,
    Middle,
    Right,
}

impl std::fmt::Display for HashMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashMark::Left => write!(f, "Left"),
            HashMark::Middle => write!(f, "Middle"),
            HashMark::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for HashMark {
    type Err = PlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(HashMark::Left),
            "middle" | "m" => Ok(HashMark::Middle),
            "right" | "r" => Ok(HashMark::Right),
            _ => Err(PlayError::InvalidHashMark(s.to_string())),
        }
    }
}

/// Play validation errors.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("quarter must be 1-4, got {0}")]
    InvalidQuarter(u8),

    #[error("yard line must be 1-99, got {0}")]
    InvalidYardLine(u8),

    #[error("team side must be Offense or Defense, got {0:?}")]
    InvalidTeamSide(String),

    #[error("hash must be Left, Middle or Right, got {0:?}")]
    InvalidHashMark(String),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Raw situational input for one play, before validation.
///
/// This is what the entry form (or CLI) submits; `PlayRecord::from_draft`
/// validates it and derives the success flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayDraft {
    pub game: String,
    pub opponent: String,
    pub team_side: TeamSide,
    pub quarter: u8,
    pub down: u8,
    pub distance: f64,
    pub yard_line: u8,
    pub hash: HashMark,
    pub formation: String,
    pub personnel: String,
    pub play_type: String,
    pub result_yards: f64,
    #[serde(default)]
    pub notes: String,
}

/// One observed play with its situational and outcome attributes.
///
/// Immutable after creation. `success` is derived from
/// (down, distance, result_yards) at entry time and must always agree with
/// a fresh recompute; a stored value that diverges is a data-integrity
/// defect, not an alternate truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// When this record was created. Informational only.
    pub timestamp: DateTime<Utc>,

    /// Game identifier (free text, typically a date).
    pub game: String,

    /// Opponent name.
    pub opponent: String,

    pub team_side: TeamSide,

    /// Quarter, 1-4.
    pub quarter: u8,

    /// Down, 1-4.
    pub down: u8,

    /// Yards needed for a first down / conversion. Always positive.
    pub distance: f64,

    /// Field position, 1-99. Retained for display, unused in aggregates.
    pub yard_line: u8,

    pub hash: HashMark,

    /// Formation code (e.g. "Trips Rt", "Ace", or a numeric set id).
    pub formation: String,

    /// Two-digit personnel tag (e.g. "11", "12", "21").
    pub personnel: String,

    /// Free-text play type category (e.g. "Run", "Pass", "RPO").
    pub play_type: String,

    /// Yards gained (negative allowed).
    pub result_yards: f64,

    /// Derived success flag. See `classify::is_success`.
    pub success: bool,

    pub notes: String,
}

impl PlayRecord {
    /// Validate a draft and build the record, computing `success`.
    pub fn from_draft(draft: PlayDraft) -> Result<Self, PlayError> {
        if !(1..=4).contains(&draft.quarter) {
            return Err(PlayError::InvalidQuarter(draft.quarter));
        }
        if !(1..=99).contains(&draft.yard_line) {
            return Err(PlayError::InvalidYardLine(draft.yard_line));
        }

        // Down/distance domain is enforced by the classifier itself.
        let success = classify::is_success(draft.down, draft.distance, draft.result_yards)?;

        Ok(Self {
            timestamp: Utc::now(),
            game: draft.game.trim().to_string(),
            opponent: draft.opponent.trim().to_string(),
            team_side: draft.team_side,
            quarter: draft.quarter,
            down: draft.down,
            distance: draft.distance,
            yard_line: draft.yard_line,
            hash: draft.hash,
            formation: draft.formation.trim().to_string(),
            personnel: draft.personnel.trim().to_string(),
            play_type: draft.play_type.trim().to_string(),
            result_yards: draft.result_yards,
            success,
            notes: draft.notes.trim().to_string(),
        })
    }

    /// Recompute the success flag from the situational fields.
    pub fn recompute_success(&self) -> Result<bool, ClassifyError> {
        classify::is_success(self.down, self.distance, self.result_yards)
    }
}
