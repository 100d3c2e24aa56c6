//! Export and admin endpoints.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::storage::csv::render_csv;

use super::plays::load_plays;

/// Download the full play log as a CSV attachment, regardless of which
/// backend stores it.
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let plays = load_plays(&state)?;
    let body = render_csv(&plays).map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"plays_export.csv\"",
            ),
        ],
        body,
    ))
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub deleted: u32,
}

/// Wipe the play log. Destructive; the caller confirms on their side.
pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    let deleted = load_plays(&state)?.len() as u32;
    state
        .store
        .overwrite(&[])
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    info!(deleted, "play log reset");
    Ok(Json(ResetResponse { deleted }))
}
