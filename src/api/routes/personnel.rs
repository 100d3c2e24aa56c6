//! Personnel explorer endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{GroupKey, PersonnelGroup, PlayTypeCount, TendencyMetrics, TendencyRow};

use super::analytics::FilterParams;
use super::plays::load_plays;

#[derive(Debug, Serialize)]
pub struct PersonnelDetail {
    pub tag: String,
    pub rb: u8,
    pub te: u8,
    pub wr: u8,
    pub total_plays: u32,
    pub metrics: Option<TendencyMetrics>,
    pub play_types: Vec<PlayTypeCount>,
    pub by_down: Vec<TendencyRow>,
}

/// Per-grouping breakdown. The tag must parse as a personnel code; an
/// unknown but valid code with no plays is an empty answer, not a 404.
pub async fn personnel_detail(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<PersonnelDetail>, ApiError> {
    let group: PersonnelGroup = tag
        .parse()
        .map_err(|err: crate::models::PersonnelError| ApiError::BadRequest(err.to_string()))?;
    let canonical = group.to_string();

    let filter = params.into_filter()?;
    let all = load_plays(&state)?;
    let matched: Vec<&crate::models::PlayRecord> = filter
        .apply(&all)
        .into_iter()
        .filter(|p| p.personnel == canonical)
        .collect();

    let metrics = calculate::summarize(&matched, &state.classifier);
    let play_types = calculate::play_type_breakdown(&matched);
    let by_down = calculate::aggregate(&matched, GroupKey::Down, &state.classifier).rows;

    Ok(Json(PersonnelDetail {
        tag: canonical,
        rb: group.rb,
        te: group.te,
        wr: group.wr,
        total_plays: matched.len() as u32,
        metrics,
        play_types,
        by_down,
    }))
}
