//! API module for shared HTTP API types
//!
//! Request and response bodies exchanged between the dashboard service and its
//! browser UI. Kept free of HTTP framework dependencies so the service wraps
//! them with axum and tests can decode them directly.

pub mod types;

pub use types::{ChartFigure, ErrorResponse, FiguresResponse, GenreQuery, GenresResponse};
