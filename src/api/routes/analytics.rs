//! Tendency analytics endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{not_all, ApiError};
use crate::calculate::{self, PlayFilter};
use crate::models::{GroupKey, PlayTypeCount, TendencyMetrics, TendencyReport, TendencyRow};

use super::plays::{load_plays, parse_side};

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub game: Option<String>,
    pub opponent: Option<String>,
    pub side: Option<String>,
}

impl FilterParams {
    pub(super) fn into_filter(self) -> Result<PlayFilter, ApiError> {
        Ok(PlayFilter {
            game: not_all(self.game),
            opponent: not_all(self.opponent),
            team_side: parse_side(self.side)?,
        })
    }
}

// ── Summary Endpoint ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_plays: u32,
    /// Absent when no plays match the filters. Rates over an empty set
    /// are undefined, never 0%.
    pub metrics: Option<TendencyMetrics>,
    pub play_types: Vec<PlayTypeCount>,
    pub by_down: Vec<TendencyRow>,
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let filter = params.into_filter()?;
    let all = load_plays(&state)?;
    let matched = filter.apply(&all);

    let metrics = calculate::summarize(&matched, &state.classifier);
    let play_types = calculate::play_type_breakdown(&matched);
    let by_down = calculate::aggregate(&matched, GroupKey::Down, &state.classifier).rows;

    Ok(Json(SummaryResponse {
        total_plays: matched.len() as u32,
        metrics,
        play_types,
        by_down,
    }))
}

// ── Tendencies Endpoint ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TendencyParams {
    pub group_by: String,
    pub game: Option<String>,
    pub opponent: Option<String>,
    pub side: Option<String>,
}

pub async fn tendencies(
    State(state): State<AppState>,
    Query(params): Query<TendencyParams>,
) -> Result<Json<TendencyReport>, ApiError> {
    let group_by: GroupKey = params.group_by.parse().map_err(ApiError::BadRequest)?;
    let filter = FilterParams {
        game: params.game,
        opponent: params.opponent,
        side: params.side,
    }
    .into_filter()?;

    let all = load_plays(&state)?;
    let matched = filter.apply(&all);

    Ok(Json(calculate::aggregate(
        &matched,
        group_by,
        &state.classifier,
    )))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::tests::{get_json, test_state, write_play};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_summary_two_play_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        write_play(&state, "week1", "Eagles", "Run", 1, 10.0, 5.0);
        write_play(&state, "week1", "Eagles", "Pass", 3, 4.0, 4.0);

        let app = build_router(state);
        let (status, body) = get_json(app, "/api/analytics/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_plays"], 2);
        assert_eq!(body["metrics"]["run_pct"], 50.0);
        assert_eq!(body["metrics"]["pass_pct"], 50.0);
        assert_eq!(body["metrics"]["success_rate_pct"], 100.0);
        assert_eq!(body["metrics"]["avg_yards"], 4.5);
        assert_eq!(body["metrics"]["explosive_rate_pct"], 0.0);

        let by_down = body["by_down"].as_array().unwrap();
        assert_eq!(by_down.len(), 2);
        assert_eq!(by_down[0]["key"], "1");
    }

    #[tokio::test]
    async fn test_summary_empty_log_has_null_metrics() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let app = build_router(state);
        let (status, body) = get_json(app, "/api/analytics/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_plays"], 0);
        assert!(body["metrics"].is_null());
        assert!(body["play_types"].as_array().unwrap().is_empty());
        assert!(body["by_down"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_respects_filters() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        write_play(&state, "week1", "Eagles", "Run", 1, 10.0, 5.0);
        write_play(&state, "week2", "Bears", "Pass", 3, 4.0, 4.0);

        let app = build_router(state);
        let (status, body) = get_json(app, "/api/analytics/summary?opponent=Bears").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_plays"], 1);
        assert_eq!(body["metrics"]["run_pct"], 0.0);
        assert_eq!(body["metrics"]["pass_pct"], 100.0);
    }

    #[tokio::test]
    async fn test_tendencies_by_formation() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        write_play(&state, "week1", "Eagles", "Run", 1, 10.0, 5.0);
        write_play(&state, "week1", "Eagles", "Pass", 2, 7.0, 12.0);

        let app = build_router(state);
        let (status, body) = get_json(app, "/api/analytics/tendencies?group_by=formation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["group_by"], "formation");
        let rows = body["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["key"], "Ace");
        assert_eq!(rows[0]["metrics"]["plays"], 2);
    }

    #[tokio::test]
    async fn test_tendencies_rejects_unknown_group() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let app = build_router(state);
        let (status, body) = get_json(app, "/api/analytics/tendencies?group_by=weather").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_tendencies_requires_group_by() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let app = build_router(state);
        let (status, _) = get_json(app, "/api/analytics/tendencies").await;

        // Missing required query param fails deserialization.
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
