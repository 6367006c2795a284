//! HTTP API handlers for p4k-trends

pub mod error;
pub mod figures;
pub mod genres;
pub mod status;
pub mod ui;

pub use error::ApiError;
pub use figures::{get_chart_figure, get_chart_series, get_figures};
pub use genres::list_genres;
pub use status::status_routes;
pub use ui::{serve_app_js, serve_index};
