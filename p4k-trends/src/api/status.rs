//! Liveness and build identification
//!
//! `/health` answers once the dataset is in memory, so it also reports how
//! much data the dashboard is serving.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// GET /health body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Rows in the loaded review table
    pub rows: usize,
    /// Distinct genres offered by the dropdown
    pub genres: usize,
    /// Configured chart count
    pub charts: usize,
}

/// GET /api/buildinfo body
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
    /// Where the review table was loaded from
    pub data_source: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "p4k-trends".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rows: state.dataset.len(),
        genres: state.dataset.genres().len(),
        charts: state.config.charts.len(),
    })
}

/// GET /api/buildinfo
///
/// Shown in the page footer
pub async fn get_build_info(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
        data_source: state.config.data_source.to_string(),
    })
}

/// Routes that do not depend on a genre selection
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buildinfo", get(get_build_info))
}
