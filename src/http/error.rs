//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::BookingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Requested slot cannot be booked
    SlotUnavailable,
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(crate::db::repository::RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::SlotUnavailable => (
                StatusCode::CONFLICT,
                ApiError::new("SLOT_UNAVAILABLE", "The requested slot is not available"),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                } else if e.is_conflict() {
                    (
                        StatusCode::CONFLICT,
                        ApiError::new("SLOT_UNAVAILABLE", "The requested slot is not available")
                            .with_details(e.to_string()),
                    )
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", e.to_string()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<crate::db::repository::RepositoryError> for AppError {
    fn from(err: crate::db::repository::RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SlotUnavailable => AppError::SlotUnavailable,
            BookingError::Repository(e) => AppError::Repository(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
