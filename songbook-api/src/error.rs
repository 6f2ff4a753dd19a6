//! Error types for songbook-api
//!
//! Every variant maps to the `{message, errors[]}` failure envelope.
//! Storage failures are logged here and reach the client without detail.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use songbook_common::api::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

/// Client-facing reason for a failed song-detail lookup
pub const DETAIL_LOOKUP_UNAVAILABLE: &str = "song details could not be retrieved";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (400), one message per offending field
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Song-detail lookup failed in production mode (503)
    ///
    /// The reason is logged, never sent to the client.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Persistence failure (500)
    #[error(transparent)]
    Storage(#[from] songbook_common::Error),
}

impl ApiError {
    pub fn validation(field: &str, message: impl std::fmt::Display) -> Self {
        ApiError::Validation(vec![format!("{}: {}", field, message)])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_errors("invalid request", errors),
            ),
            ApiError::ServiceUnavailable(reason) => {
                warn!("Service unavailable: {}", reason);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::with_errors(
                        "service unavailable, try again later",
                        vec![DETAIL_LOOKUP_UNAVAILABLE.to_string()],
                    ),
                )
            }
            ApiError::Storage(err) => {
                error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers and the song service
pub type ApiResult<T> = Result<T, ApiError>;
