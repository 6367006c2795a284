//! Integration tests for p4k-trends API endpoints
//!
//! Tests cover:
//! - Health and build info endpoints
//! - Genre listing in first-seen order with the default genre
//! - Figures for both charts, per-chart figures, raw series
//! - Error mapping: unknown genre → 404, unknown chart → 404, empty genre → 400
//! - UI page and script

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use p4k_common::config::DashboardConfig;
use p4k_common::dataset::{Dataset, ReviewRecord};
use p4k_common::labels::LabelVariant;
use p4k_trends::{build_router, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

const AOTY: &str = "Sum of AOTY Points";
const BNM: &str = "Proportion Genre Given BNM";

/// Test helper: small in-memory review table
fn test_dataset() -> Dataset {
    Dataset::new(vec![
        ReviewRecord::new("Rock", AOTY, 2003, 12.0),
        ReviewRecord::new("Rock", AOTY, 2004, 15.0),
        ReviewRecord::new("Rock", AOTY, 2005, 9.0),
        ReviewRecord::new("Rock", BNM, 2003, 0.1),
        ReviewRecord::new("Rock", BNM, 2004, 0.15),
        ReviewRecord::new("Rock", BNM, 2005, 0.2345),
        ReviewRecord::new("Electronic", AOTY, 2004, 40.0),
        ReviewRecord::new("Electronic", AOTY, 2003, 30.0),
        ReviewRecord::new("Electronic", BNM, 2003, 0.3),
        ReviewRecord::new("Electronic", BNM, 2004, 0.25),
        ReviewRecord::new("Global", AOTY, 2010, 1.0),
    ])
    .expect("Should build dataset")
}

/// Test helper: Create app with default configuration
fn setup_app() -> axum::Router {
    build_router(AppState::new(test_dataset(), DashboardConfig::default()))
}

/// Test helper: Create app with a custom configuration
fn setup_app_with(config: DashboardConfig) -> axum::Router {
    build_router(AppState::new(test_dataset(), config))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health and Build Info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = setup_app().oneshot(test_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "p4k-trends");
    assert!(body["version"].is_string());
    assert_eq!(body["rows"], 11);
    assert_eq!(body["genres"], 3);
    assert_eq!(body["charts"], 2);
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let response = setup_app()
        .oneshot(test_request("/api/buildinfo"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
    assert!(body["build_profile"].is_string());
    assert_eq!(
        body["data_source"],
        p4k_common::dataset::DEFAULT_DATA_URL
    );
}

// =============================================================================
// Genres
// =============================================================================

#[tokio::test]
async fn test_genres_first_seen_order() {
    let response = setup_app()
        .oneshot(test_request("/api/genres"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["genres"],
        serde_json::json!(["Rock", "Electronic", "Global"])
    );
    assert_eq!(body["default_genre"], "Rock");
}

// =============================================================================
// Figures
// =============================================================================

#[tokio::test]
async fn test_figures_default_genre() {
    let response = setup_app()
        .oneshot(test_request("/api/figures"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["genre"], "Rock");

    let charts = body["charts"].as_array().expect("charts should be an array");
    assert_eq!(charts.len(), 2);

    // Points chart
    assert_eq!(charts[0]["id"], "aoty-points");
    assert_eq!(charts[0]["indicator"], AOTY);
    let points = &charts[0]["figure"];
    assert_eq!(points["data"][0]["x"], serde_json::json!([2003, 2004, 2005]));
    assert_eq!(points["data"][0]["y"], serde_json::json!([12.0, 15.0, 9.0]));
    assert_eq!(points["layout"]["annotations"][0]["text"], "AOTY Points");
    assert_eq!(points["layout"]["annotations"][1]["text"], "9");

    // Proportion chart
    assert_eq!(charts[1]["id"], "bnm-proportion");
    let proportion = &charts[1]["figure"];
    assert_eq!(proportion["layout"]["annotations"][0]["text"], "BNM Proportion");
    assert_eq!(proportion["layout"]["annotations"][1]["text"], "23%");
    assert_eq!(proportion["layout"]["yaxis"]["hoverformat"], ",.0%");
}

#[tokio::test]
async fn test_figures_selected_genre_sorted_by_year() {
    let response = setup_app()
        .oneshot(test_request("/api/figures?genre=Electronic"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["genre"], "Electronic");
    let points = &body["charts"][0]["figure"];
    assert_eq!(points["data"][0]["x"], serde_json::json!([2003, 2004]));
    assert_eq!(points["layout"]["annotations"][1]["text"], "40");
    assert_eq!(
        body["charts"][1]["figure"]["layout"]["annotations"][1]["text"],
        "25%"
    );
}

#[tokio::test]
async fn test_figures_url_encoded_genre() {
    let dataset = Dataset::new(vec![
        ReviewRecord::new("Folk/Country", AOTY, 2003, 2.0),
        ReviewRecord::new("Folk/Country", BNM, 2003, 0.05),
    ])
    .unwrap();
    let app = build_router(AppState::new(dataset, DashboardConfig::default()));

    let response = app
        .oneshot(test_request("/api/figures?genre=Folk%2FCountry"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["genre"], "Folk/Country");
}

#[tokio::test]
async fn test_figures_unknown_genre_not_found() {
    let response = setup_app()
        .oneshot(test_request("/api/figures?genre=Nonexistent%20Genre"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.contains("Nonexistent Genre"), "message: {}", message);
}

#[tokio::test]
async fn test_figures_genre_missing_one_indicator_not_found() {
    // "Global" has AOTY rows but no BNM rows
    let response = setup_app()
        .oneshot(test_request("/api/figures?genre=Global"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_figures_empty_genre_bad_request() {
    let response = setup_app()
        .oneshot(test_request("/api/figures?genre="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_single_chart_figure() {
    let response = setup_app()
        .oneshot(test_request("/api/figures/aoty-points?genre=Global"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], "aoty-points");
    assert_eq!(body["figure"]["data"][0]["x"], serde_json::json!([2010]));
    assert_eq!(body["figure"]["layout"]["annotations"][1]["text"], "1");
}

#[tokio::test]
async fn test_unknown_chart_not_found() {
    let response = setup_app()
        .oneshot(test_request("/api/figures/no-such-chart"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("no-such-chart"));
}

// =============================================================================
// Series
// =============================================================================

#[tokio::test]
async fn test_series_endpoint() {
    let response = setup_app()
        .oneshot(test_request("/api/series/bnm-proportion?genre=Rock"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["genre"], "Rock");
    assert_eq!(body["indicator"], BNM);
    assert_eq!(body["points"][2]["year"], 2005);
    let last_value = body["points"][2]["value"].as_f64().unwrap();
    assert!((last_value - 0.2345).abs() < 1e-12);
    assert_eq!(body["first_label"], "BNM Proportion");
    assert_eq!(body["last_label"], "23%");
}

#[tokio::test]
async fn test_series_with_value_labels() {
    let config = DashboardConfig {
        label_variant: LabelVariant::CaptionWithValue,
        ..DashboardConfig::default()
    };

    let response = setup_app_with(config)
        .oneshot(test_request("/api/series/aoty-points?genre=Rock"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["first_label"], "AOTY Points 12");
    assert_eq!(body["last_label"], "9");
}

#[tokio::test]
async fn test_series_idempotent() {
    let app = setup_app();

    let first = app
        .clone()
        .oneshot(test_request("/api/series/aoty-points?genre=Electronic"))
        .await
        .unwrap();
    let second = app
        .oneshot(test_request("/api/series/aoty-points?genre=Electronic"))
        .await
        .unwrap();

    assert_eq!(
        extract_json(first.into_body()).await,
        extract_json(second.into_body()).await
    );
}

// =============================================================================
// UI
// =============================================================================

#[tokio::test]
async fn test_index_page() {
    let response = setup_app().oneshot(test_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Select Genre:"));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_app_js_content_type() {
    let response = setup_app()
        .oneshot(test_request("/static/app.js"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/javascript; charset=utf-8"
    );
    assert_eq!(response.headers()["cache-control"], "no-cache");
}
