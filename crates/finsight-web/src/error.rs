use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::ErrorResponse;

/// Failures surfaced to clients as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing client input.
    Validation(String),
    /// The uploaded document could not be read.
    Extraction(String),
    /// The generation service failed.
    Generation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Generation(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::Validation(m) | ApiError::Extraction(m) | ApiError::Generation(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            detail: self.detail().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
