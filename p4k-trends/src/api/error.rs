//! API error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use p4k_common::api::ErrorResponse;
use tracing::{error, warn};

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// No series for the selection, or unknown chart id
    NotFound(String),
    /// Malformed request parameter
    BadRequest(String),
    /// Data or configuration problem on the server side
    Internal(String),
}

impl From<p4k_common::Error> for ApiError {
    fn from(err: p4k_common::Error) -> Self {
        use p4k_common::Error;

        match err {
            Error::NoData { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => {
                warn!("{}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
