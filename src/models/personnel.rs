//! Personnel grouping parser.
//!
//! A personnel tag is a two-digit code: first digit counts running backs,
//! second counts tight ends. With five linemen and a quarterback fixed,
//! the remaining skill players are assumed wide receivers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Skill players on the field besides QB and the five linemen.
pub const SKILL_PLAYERS: u8 = 5;

/// Personnel parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonnelError {
    #[error("personnel tag is empty")]
    Empty,

    #[error("personnel tag must be two digits, got {0:?}")]
    NotDigits(String),
}

/// Parsed personnel grouping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelGroup {
    pub rb: u8,
    pub te: u8,
    pub wr: u8,
}

impl FromStr for PersonnelGroup {
    type Err = PersonnelError;

    /// Parse a tag like "11", "12", "21". A single-digit tag is treated as
    /// a shorthand mistake and right-padded with "0" ("1" -> "10").
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let mut s = tag.trim().to_string();
        if s.is_empty() {
            return Err(PersonnelError::Empty);
        }
        if s.chars().count() == 1 {
            s.push('0');
        }

        let mut digits = s.chars();
        let rb = digits
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| PersonnelError::NotDigits(tag.to_string()))?;
        let te = digits
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| PersonnelError::NotDigits(tag.to_string()))?;

        let rb = rb as u8;
        let te = te as u8;
        // Clamp at zero so malformed tags like "43" never go negative.
        let wr = SKILL_PLAYERS.saturating_sub(rb + te);

        Ok(Self { rb, te, wr })
    }
}

impl std::fmt::Display for PersonnelGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rb, self.te)
    }
}
