//! Shared API request/response types

use serde::{Deserialize, Serialize};

use crate::figure::Figure;

// ========================================
// Request Types
// ========================================

/// Genre selection passed as a query parameter
///
/// # Examples
///
/// ```
/// // GET /api/figures?genre=Rock
/// use p4k_common::api::types::GenreQuery;
///
/// let query: GenreQuery = serde_json::from_str(r#"{"genre": "Rock"}"#).unwrap();
/// assert_eq!(query.genre.as_deref(), Some("Rock"));
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenreQuery {
    /// Selected genre; the configured default applies when absent
    pub genre: Option<String>,
}

// ========================================
// Response Types
// ========================================

/// Dropdown contents
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenresResponse {
    /// Distinct genres in first-seen order
    pub genres: Vec<String>,
    /// Genre selected when the page loads
    pub default_genre: String,
}

/// One rendered chart
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartFigure {
    /// Chart identifier from configuration
    pub id: String,
    /// Indicator the chart plots
    pub indicator: String,
    pub figure: Figure,
}

/// Every chart for one genre selection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FiguresResponse {
    pub genre: String,
    pub charts: Vec<ChartFigure>,
}

/// Error body for all failed API requests
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ========================================
// Tests
// ========================================
