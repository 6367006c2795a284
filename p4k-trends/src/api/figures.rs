//! Chart endpoints: selection in, figures out
//!
//! Every request recomputes from the read-only dataset; nothing is cached and
//! nothing is shared between the charts of one selection.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use p4k_common::api::{ChartFigure, FiguresResponse, GenreQuery};
use p4k_common::config::ChartDefinition;
use p4k_common::figure::build_figure;
use p4k_common::{compute_series, Series};
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Selected genre, or the configured default when the query omits it
fn selected_genre(state: &AppState, query: GenreQuery) -> Result<String, ApiError> {
    match query.genre {
        Some(genre) if genre.trim().is_empty() => {
            Err(ApiError::BadRequest("genre must not be empty".to_string()))
        }
        Some(genre) => Ok(genre),
        None => Ok(state.config.default_genre.clone()),
    }
}

fn find_chart<'a>(state: &'a AppState, chart_id: &str) -> Result<&'a ChartDefinition, ApiError> {
    state
        .config
        .chart(chart_id)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown chart: {}", chart_id)))
}

fn chart_series(state: &AppState, chart: &ChartDefinition, genre: &str) -> Result<Series, ApiError> {
    let series = compute_series(
        &state.dataset,
        genre,
        &chart.to_indicator(),
        state.config.label_variant,
    )?;

    debug!(
        chart = %chart.id,
        genre = %genre,
        points = series.points.len(),
        "Computed series"
    );

    Ok(series)
}

fn chart_figure(state: &AppState, chart: &ChartDefinition, genre: &str) -> Result<ChartFigure, ApiError> {
    let series = chart_series(state, chart, genre)?;

    Ok(ChartFigure {
        id: chart.id.clone(),
        indicator: chart.indicator.clone(),
        figure: build_figure(&series, &chart.style()),
    })
}

/// GET /api/figures?genre=G
///
/// Figures for every configured chart. Fails as a whole if any chart has no
/// data for the genre.
pub async fn get_figures(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<FiguresResponse>, ApiError> {
    let genre = selected_genre(&state, query)?;

    let charts = state
        .config
        .charts
        .iter()
        .map(|chart| chart_figure(&state, chart, &genre))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(FiguresResponse { genre, charts }))
}

/// GET /api/figures/:chart_id?genre=G
pub async fn get_chart_figure(
    State(state): State<AppState>,
    Path(chart_id): Path<String>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<ChartFigure>, ApiError> {
    let chart = find_chart(&state, &chart_id)?;
    let genre = selected_genre(&state, query)?;

    Ok(Json(chart_figure(&state, chart, &genre)?))
}

/// GET /api/series/:chart_id?genre=G
///
/// Raw points and labels, without plotting layout
pub async fn get_chart_series(
    State(state): State<AppState>,
    Path(chart_id): Path<String>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<Series>, ApiError> {
    let chart = find_chart(&state, &chart_id)?;
    let genre = selected_genre(&state, query)?;

    Ok(Json(chart_series(&state, chart, &genre)?))
}
