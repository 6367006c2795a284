//! Embedded page and script
//!
//! Both assets are compiled into the binary. The page holds the genre
//! dropdown and one plot container per configured chart.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// Embedded asset with its content type; browsers revalidate on every load
fn asset(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// GET /
pub async fn serve_index() -> Response {
    asset("text/html; charset=utf-8", INDEX_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    asset("text/javascript; charset=utf-8", APP_JS)
}
