//! Genre listing for the dropdown

use axum::{extract::State, Json};
use p4k_common::api::GenresResponse;

use crate::AppState;

/// GET /api/genres
///
/// Distinct genres in first-seen order plus the genre to preselect.
pub async fn list_genres(State(state): State<AppState>) -> Json<GenresResponse> {
    Json(GenresResponse {
        genres: state.dataset.genres().to_vec(),
        default_genre: state.config.default_genre.clone(),
    })
}
