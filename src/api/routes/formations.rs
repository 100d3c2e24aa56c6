//! Formation explorer endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{GroupKey, PlayTypeCount, TendencyMetrics, TendencyRow};

use super::analytics::FilterParams;
use super::plays::load_plays;

#[derive(Debug, Serialize)]
pub struct FormationDetail {
    pub formation: String,
    /// Relative URL of the formation diagram, served from the assets dir.
    /// The image may or may not exist on disk; the client falls back to
    /// text when it 404s.
    pub asset_path: String,
    pub total_plays: u32,
    pub metrics: Option<TendencyMetrics>,
    pub play_types: Vec<PlayTypeCount>,
    pub by_down: Vec<TendencyRow>,
}

/// Diagram filename slug: lowercase, spaces to underscores.
fn formation_slug(formation: &str) -> String {
    formation.trim().to_lowercase().replace(' ', "_")
}

/// Per-formation breakdown. A formation with no plays on record is a valid
/// answer (empty metrics), not a 404; coaches look up formations they are
/// about to install.
pub async fn formation_detail(
    State(state): State<AppState>,
    Path(formation): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<FormationDetail>, ApiError> {
    let filter = params.into_filter()?;
    let all = load_plays(&state)?;
    let matched: Vec<&crate::models::PlayRecord> = filter
        .apply(&all)
        .into_iter()
        .filter(|p| p.formation.eq_ignore_ascii_case(formation.trim()))
        .collect();

    let metrics = calculate::summarize(&matched, &state.classifier);
    let play_types = calculate::play_type_breakdown(&matched);
    let by_down = calculate::aggregate(&matched, GroupKey::Down, &state.classifier).rows;

    Ok(Json(FormationDetail {
        asset_path: format!("assets/formation_{}.png", formation_slug(&formation)),
        formation,
        total_plays: matched.len() as u32,
        metrics,
        play_types,
        by_down,
    }))
}
