//! Play entry and play log endpoints.

use std::collections::BTreeSet;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{not_all, ApiError, Pagination, PaginationMeta};
use crate::calculate::PlayFilter;
use crate::models::{PlayDraft, PlayRecord, TeamSide};

/// Parse an optional side filter, treating "(all)" and blanks as no filter.
pub(super) fn parse_side(side: Option<String>) -> Result<Option<TeamSide>, ApiError> {
    match not_all(side) {
        Some(raw) => raw
            .parse::<TeamSide>()
            .map(Some)
            .map_err(|err| ApiError::BadRequest(err.to_string())),
        None => Ok(None),
    }
}

pub(super) fn load_plays(state: &AppState) -> Result<Vec<PlayRecord>, ApiError> {
    state
        .store
        .load()
        .map_err(|err| ApiError::Internal(err.to_string()))
}

// ── Entry Endpoint ──────────────────────────────────────────────

/// Log a new play. Validation failures (bad down, non-positive distance,
/// quarter or yard line out of range) come back as 400 with the reason;
/// the stored record, success flag included, comes back on 201.
pub async fn create_play(
    State(state): State<AppState>,
    Json(draft): Json<PlayDraft>,
) -> Result<(StatusCode, Json<PlayRecord>), ApiError> {
    let record =
        PlayRecord::from_draft(draft).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    state
        .store
        .append(&record)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ── Log Endpoint ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub game: Option<String>,
    pub opponent: Option<String>,
    pub side: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub plays: Vec<PlayRecord>,
    pub pagination: PaginationMeta,
}

/// Filtered play log, most recent first.
pub async fn list_plays(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let filter = PlayFilter {
        game: not_all(params.game),
        opponent: not_all(params.opponent),
        team_side: parse_side(params.side)?,
    };

    let all = load_plays(&state)?;
    let mut matched: Vec<PlayRecord> = all.into_iter().filter(|p| filter.matches(p)).collect();
    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let pagination = Pagination::new(params.page, params.page_size);
    let total = matched.len() as u32;
    let plays: Vec<PlayRecord> = matched
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.page_size as usize)
        .collect();

    Ok(Json(ListResponse {
        plays,
        pagination: PaginationMeta::new(&pagination, total),
    }))
}

// ── Filter Options Endpoint ─────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub games: Vec<String>,
    pub opponents: Vec<String>,
}

/// Distinct games and opponents seen in the log, for filter dropdowns.
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, ApiError> {
    let plays = load_plays(&state)?;

    let games: BTreeSet<String> = plays.iter().map(|p| p.game.clone()).collect();
    let opponents: BTreeSet<String> = plays.iter().map(|p| p.opponent.clone()).collect();

    Ok(Json(FilterOptions {
        games: games.into_iter().collect(),
        opponents: opponents.into_iter().collect(),
    }))
}
