//! Tendency report models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dimension a tendency report is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Down,
    Formation,
    Personnel,
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(GroupKey::Down),
            "formation" => Ok(GroupKey::Formation),
            "personnel" => Ok(GroupKey::Personnel),
            other => Err(format!(
                "unknown group key {:?} (expected down, formation or personnel)",
                other
            )),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Down => write!(f, "down"),
            GroupKey::Formation => write!(f, "formation"),
            GroupKey::Personnel => write!(f, "personnel"),
        }
    }
}

/// The five tendency metrics over a non-empty set of plays.
///
/// Only ever constructed for a non-empty group; "no data" is represented by
/// the absence of the metrics (`None` / omitted row), never by zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TendencyMetrics {
    /// Number of plays in the group.
    pub plays: u32,

    /// Run-like share, percent, one decimal.
    pub run_pct: f64,

    /// Pass-like share, percent, one decimal. Always 100.0 - run_pct.
    pub pass_pct: f64,

    /// Successful-play share, percent, one decimal.
    pub success_rate_pct: f64,

    /// Mean of result yards, two decimals.
    pub avg_yards: f64,

    /// Explosive-play share, percent, one decimal.
    pub explosive_rate_pct: f64,
}

/// One row of a grouped tendency report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TendencyRow {
    /// Group key rendered as text ("1".."4" for downs, otherwise the
    /// formation or personnel code).
    pub key: String,

    pub metrics: TendencyMetrics,
}

/// A grouped tendency report. Rows are sorted by key; groups with no plays
/// are omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TendencyReport {
    pub group_by: GroupKey,
    pub rows: Vec<TendencyRow>,
}

/// Count of plays per normalized play type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayTypeCount {
    pub play_type: String,
    pub plays: u32,
}
