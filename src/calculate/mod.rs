//! Tendency calculation engine.
//!
//! Computes derived metrics from logged plays:
//! - run/pass mix, success rate, average gain, explosive rate
//! - grouped tendency tables by down, formation or personnel
//! - play type breakdowns
//!
//! Stateless by design: every call recomputes from the full filtered set.
//! The dataset is hundreds to low thousands of plays per season, so there is
//! nothing to cache.

use std::collections::BTreeMap;

use crate::classify::{normalize_play_type, Classifier};
use crate::models::{
    GroupKey, PlayRecord, PlayTypeCount, TeamSide, TendencyMetrics, TendencyReport, TendencyRow,
};

/// Exact-match filter over the play log dimensions. `None` means the
/// dimension is unfiltered (the presentation layer's "(all)" choice).
#[derive(Debug, Clone, Default)]
pub struct PlayFilter {
    pub game: Option<String>,
    pub opponent: Option<String>,
    pub team_side: Option<TeamSide>,
}

impl PlayFilter {
    pub fn matches(&self, play: &PlayRecord) -> bool {
        if let Some(ref game) = self.game {
            if &play.game != game {
                return false;
            }
        }
        if let Some(ref opponent) = self.opponent {
            if &play.opponent != opponent {
                return false;
            }
        }
        if let Some(side) = self.team_side {
            if play.team_side != side {
                return false;
            }
        }
        true
    }

    /// Apply the filter, borrowing the matching records.
    pub fn apply<'a>(&self, plays: &'a [PlayRecord]) -> Vec<&'a PlayRecord> {
        plays.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Round to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute the tendency metrics over a set of plays.
///
/// Returns `None` for an empty set: rate metrics over zero plays are
/// undefined, and reporting them as 0% would be misleading.
pub fn summarize(plays: &[&PlayRecord], classifier: &Classifier) -> Option<TendencyMetrics> {
    if plays.is_empty() {
        return None;
    }

    let n = plays.len() as f64;
    let run_count = plays
        .iter()
        .filter(|p| classifier.is_run_like(&p.play_type))
        .count() as f64;
    let success_count = plays.iter().filter(|p| p.success).count() as f64;
    let explosive_count = plays
        .iter()
        .filter(|p| classifier.is_explosive(&p.play_type, p.result_yards))
        .count() as f64;
    let yards_sum: f64 = plays.iter().map(|p| p.result_yards).sum();

    let run_pct = round1(100.0 * run_count / n);
    // Derived from the rounded run share so the pair always sums to 100.0.
    let pass_pct = round1(100.0 - run_pct);

    Some(TendencyMetrics {
        plays: plays.len() as u32,
        run_pct,
        pass_pct,
        success_rate_pct: round1(100.0 * success_count / n),
        avg_yards: round2(yards_sum / n),
        explosive_rate_pct: round1(100.0 * explosive_count / n),
    })
}

fn group_value(play: &PlayRecord, key: GroupKey) -> String {
    match key {
        GroupKey::Down => play.down.to_string(),
        GroupKey::Formation => play.formation.clone(),
        GroupKey::Personnel => play.personnel.clone(),
    }
}

/// Build a grouped tendency report. Rows come out sorted by group key;
/// an empty input produces an empty report rather than zero-filled rows.
pub fn aggregate(
    plays: &[&PlayRecord],
    group_by: GroupKey,
    classifier: &Classifier,
) -> TendencyReport {
    let mut groups: BTreeMap<String, Vec<&PlayRecord>> = BTreeMap::new();
    for play in plays {
        groups
            .entry(group_value(play, group_by))
            .or_default()
            .push(play);
    }

    let rows = groups
        .into_iter()
        .filter_map(|(key, group)| {
            summarize(&group, classifier).map(|metrics| TendencyRow { key, metrics })
        })
        .collect();

    TendencyReport { group_by, rows }
}

/// Count plays per normalized play type label, most frequent first
/// (ties broken alphabetically).
pub fn play_type_breakdown(plays: &[&PlayRecord]) -> Vec<PlayTypeCount> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for play in plays {
        *counts
            .entry(normalize_play_type(&play.play_type))
            .or_default() += 1;
    }

    let mut breakdown: Vec<PlayTypeCount> = counts
        .into_iter()
        .map(|(play_type, plays)| PlayTypeCount { play_type, plays })
        .collect();
    breakdown.sort_by(|a, b| {
        b.plays
            .cmp(&a.plays)
            .then_with(|| a.play_type.cmp(&b.play_type))
    });
    breakdown
}
