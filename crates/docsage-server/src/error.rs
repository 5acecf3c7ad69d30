//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use docsage_core::Error;

/// Error response with a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    /// Map a core error. Unclassified failures become a 500 whose detail is
    /// prefixed with `context`.
    pub fn from_core(err: Error, context: &str) -> Self {
        if err.is_client_error() {
            warn!("{}: {}", context, err);
            return Self::new(StatusCode::BAD_REQUEST, err.to_string());
        }
        let status = match &err {
            Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Error::ConfigurationMissing(_) | Error::IndexUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Error::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            _ => {
                error!("{}: {}", context, err);
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}: {}", context, err),
                );
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
