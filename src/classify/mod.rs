//! Play classification rules.
//!
//! Two pure classifiers drive every derived metric:
//! - success: a down-dependent yardage threshold
//! - explosive: a large-gain threshold that differs for run-like and
//!   pass-like plays
//!
//! Run-like vs. pass-like is decided by matching the play type label against
//! a configurable substring list (default: "run", "rpo"). Anything that does
//! not match is pass-like.

use regex::Regex;
use thiserror::Error;

/// Minimum gain for a run-like play to count as explosive.
pub const DEFAULT_RUN_EXPLOSIVE_YARDS: f64 = 10.0;

/// Minimum gain for a pass-like play to count as explosive.
pub const DEFAULT_PASS_EXPLOSIVE_YARDS: f64 = 15.0;

/// Default run-like play type patterns. RPO is counted run-like for
/// run/pass ratio purposes.
pub const DEFAULT_RUN_PATTERNS: &[&str] = &["run", "rpo"];

/// Classification errors.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("down must be 1-4, got {0}")]
    InvalidDown(u8),

    #[error("distance must be positive, got {0}")]
    InvalidDistance(f64),

    #[error("run-like pattern list is empty")]
    EmptyPatterns,

    #[error("invalid run-like pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Decide whether a play was successful.
///
/// - 1st down: gained >= 4, regardless of distance
/// - 2nd down: gained >= distance / 2 (exact real comparison, no rounding)
/// - 3rd/4th down: gained >= distance
///
/// Fails fast on a down outside 1-4 or a non-positive distance rather than
/// guessing a fallback.
pub fn is_success(down: u8, distance: f64, gained: f64) -> Result<bool, ClassifyError> {
    if !(1..=4).contains(&down) {
        return Err(ClassifyError::InvalidDown(down));
    }
    if !(distance > 0.0) {
        return Err(ClassifyError::InvalidDistance(distance));
    }

    Ok(match down {
        1 => gained >= 4.0,
        2 => gained >= distance / 2.0,
        _ => gained >= distance,
    })
}

/// Run-like or pass-like classification bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayClass {
    RunLike,
    PassLike,
}

/// Compiled play type classifier with explosive thresholds.
///
/// The pattern list is compiled once into a case-insensitive alternation;
/// each pattern is a plain substring, not a regex.
#[derive(Debug, Clone)]
pub struct Classifier {
    run_like: Regex,
    run_explosive_yards: f64,
    pass_explosive_yards: f64,
}

impl Classifier {
    /// Build a classifier from a substring pattern list and thresholds.
    pub fn new(
        run_patterns: &[String],
        run_explosive_yards: f64,
        pass_explosive_yards: f64,
    ) -> Result<Self, ClassifyError> {
        if run_patterns.is_empty() {
            return Err(ClassifyError::EmptyPatterns);
        }

        let alternation = run_patterns
            .iter()
            .map(|p| regex::escape(p.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let run_like = Regex::new(&format!("(?i){}", alternation))?;

        Ok(Self {
            run_like,
            run_explosive_yards,
            pass_explosive_yards,
        })
    }

    /// Build a classifier with the default patterns and thresholds.
    pub fn default_rules() -> Result<Self, ClassifyError> {
        let patterns: Vec<String> = DEFAULT_RUN_PATTERNS.iter().map(|s| s.to_string()).collect();
        Self::new(
            &patterns,
            DEFAULT_RUN_EXPLOSIVE_YARDS,
            DEFAULT_PASS_EXPLOSIVE_YARDS,
        )
    }

    /// Classify a play type label as run-like or pass-like.
    pub fn play_class(&self, play_type: &str) -> PlayClass {
        if self.run_like.is_match(play_type.trim()) {
            PlayClass::RunLike
        } else {
            PlayClass::PassLike
        }
    }

    pub fn is_run_like(&self, play_type: &str) -> bool {
        self.play_class(play_type) == PlayClass::RunLike
    }

    /// Decide whether a play was explosive: run-like plays at
    /// `run_explosive_yards` or more, pass-like at `pass_explosive_yards`.
    pub fn is_explosive(&self, play_type: &str, gained: f64) -> bool {
        match self.play_class(play_type) {
            PlayClass::RunLike => gained >= self.run_explosive_yards,
            PlayClass::PassLike => gained >= self.pass_explosive_yards,
        }
    }
}

/// Normalize a free-text play type label for display grouping:
/// trim and title-case each word ("play action" -> "Play Action").
pub fn normalize_play_type(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::default_rules().unwrap()
    }

    #[test]
    fn test_success_first_down_fixed_threshold() {
        // Independent of distance
        assert!(is_success(1, 10.0, 4.0).unwrap());
        assert!(is_success(1, 2.0, 4.0).unwrap());
        assert!(!is_success(1, 10.0, 3.9).unwrap());
        assert!(is_success(1, 25.0, 12.0).unwrap());
    }

    #[test]
    fn test_success_second_down_half_distance() {
        assert!(is_success(2, 10.0, 5.0).unwrap());
        assert!(!is_success(2, 10.0, 4.9).unwrap());
        // Odd distance: exact fractional boundary, no rounding
        assert!(is_success(2, 7.0, 3.5).unwrap());
        assert!(!is_success(2, 7.0, 3.4).unwrap());
    }

    #[test]
    fn test_success_late_downs_full_distance() {
        assert!(is_success(3, 4.0, 4.0).unwrap());
        assert!(!is_success(3, 4.0, 3.9).unwrap());
        assert!(is_success(4, 1.0, 1.0).unwrap());
        assert!(!is_success(4, 1.0, 0.5).unwrap());
    }

    #[test]
    fn test_success_negative_gain() {
        assert!(!is_success(1, 10.0, -3.0).unwrap());
        assert!(!is_success(3, 2.0, -1.0).unwrap());
    }

    #[test]
    fn test_success_rejects_bad_down() {
        assert!(matches!(
            is_success(0, 10.0, 5.0),
            Err(ClassifyError::InvalidDown(0))
        ));
        assert!(matches!(
            is_success(5, 10.0, 5.0),
            Err(ClassifyError::InvalidDown(5))
        ));
    }

    #[test]
    fn test_success_rejects_bad_distance() {
        assert!(matches!(
            is_success(2, 0.0, 5.0),
            Err(ClassifyError::InvalidDistance(_))
        ));
        assert!(matches!(
            is_success(2, -3.0, 5.0),
            Err(ClassifyError::InvalidDistance(_))
        ));
    }

    #[test]
    fn test_play_class_defaults() {
        let c = classifier();
        assert_eq!(c.play_class("Run"), PlayClass::RunLike);
        assert_eq!(c.play_class("RPO"), PlayClass::RunLike);
        assert_eq!(c.play_class("rpo"), PlayClass::RunLike);
        assert_eq!(c.play_class("Pass"), PlayClass::PassLike);
        assert_eq!(c.play_class("Screen"), PlayClass::PassLike);
        assert_eq!(c.play_class("Play Action"), PlayClass::PassLike);
        assert_eq!(c.play_class("Special Teams"), PlayClass::PassLike);
        assert_eq!(c.play_class("Other"), PlayClass::PassLike);
    }

    #[test]
    fn test_play_class_substring_match() {
        let c = classifier();
        // Substring semantics: "Outside Run" is still run-like
        assert_eq!(c.play_class("Outside Run"), PlayClass::RunLike);
        assert_eq!(c.play_class("  run  "), PlayClass::RunLike);
    }

    #[test]
    fn test_play_class_custom_patterns() {
        let c = Classifier::new(
            &["run".to_string(), "rpo".to_string(), "option".to_string()],
            10.0,
            15.0,
        )
        .unwrap();
        assert_eq!(c.play_class("Triple Option"), PlayClass::RunLike);
        assert_eq!(c.play_class("Draw"), PlayClass::PassLike);
    }

    #[test]
    fn test_classifier_rejects_empty_patterns() {
        assert!(matches!(
            Classifier::new(&[], 10.0, 15.0),
            Err(ClassifyError::EmptyPatterns)
        ));
    }

    #[test]
    fn test_explosive_run_threshold() {
        let c = classifier();
        assert!(c.is_explosive("Run", 10.0));
        assert!(!c.is_explosive("Run", 9.999));
        assert!(c.is_explosive("RPO", 10.0));
    }

    #[test]
    fn test_explosive_pass_threshold() {
        let c = classifier();
        assert!(c.is_explosive("Pass", 15.0));
        assert!(!c.is_explosive("Pass", 14.0));
        assert!(!c.is_explosive("Screen", 12.0));
        assert!(c.is_explosive("Play Action", 22.0));
    }

    #[test]
    fn test_normalize_play_type() {
        assert_eq!(normalize_play_type("  run "), "Run");
        assert_eq!(normalize_play_type("play action"), "Play Action");
        assert_eq!(normalize_play_type("RPO"), "Rpo");
        assert_eq!(normalize_play_type("SPECIAL teams"), "Special Teams");
        assert_eq!(normalize_play_type(""), "");
    }
}
