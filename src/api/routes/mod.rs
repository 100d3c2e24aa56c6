//! Route definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::state::AppState;

pub mod admin;
pub mod analytics;
pub mod formations;
pub mod personnel;
pub mod plays;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let assets_dir = state.store.config().assets_dir();

    Router::new()
        .route("/api/plays", post(plays::create_play).get(plays::list_plays))
        .route("/api/plays/filters", get(plays::filter_options))
        .route("/api/analytics/summary", get(analytics::summary))
        .route("/api/analytics/tendencies", get(analytics::tendencies))
        .route("/api/formations/:formation", get(formations::formation_detail))
        .route("/api/personnel/:tag", get(personnel::personnel_detail))
        .route("/api/export", get(admin::export_csv))
        .route("/api/admin/reset", post(admin::reset))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
