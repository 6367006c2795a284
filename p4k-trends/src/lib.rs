//! p4k-trends library - Genre Trends dashboard
//!
//! Serves a single page with a genre dropdown and two time-series charts,
//! plus the JSON API the page calls whenever the selection changes.

use std::sync::Arc;

use axum::Router;
use p4k_common::config::DashboardConfig;
use p4k_common::Dataset;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Review table, loaded once at startup (read-only)
    pub dataset: Arc<Dataset>,
    /// Resolved configuration (chart definitions, default genre)
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/genres", get(api::list_genres))
        .route("/api/figures", get(api::get_figures))
        .route("/api/figures/:chart_id", get(api::get_chart_figure))
        .route("/api/series/:chart_id", get(api::get_chart_series));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::status_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
