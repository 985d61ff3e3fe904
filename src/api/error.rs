//! Conversion of feed errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::FeedError;

/// Fixed headline for every failed feed load.
pub const LOAD_FAILED: &str = "Failed to load earthquake data";

/// Error body of `GET /api/earthquakes`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Generic headline.
    pub error: &'static str,
    /// Underlying error text.
    pub message: String,
}

/// Handler error wrapping a [`FeedError`].
#[derive(Debug)]
pub struct ApiError(pub FeedError);

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, kind = self.0.kind(), "ERROR in /api/earthquakes");

        let body = ErrorResponse {
            error: LOAD_FAILED,
            message: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
