pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned by every error response.
///
/// ```json
/// {
///   "error": "Not Found",
///   "message": "The requested resource was not found on this server."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short, stable error label
    pub error: String,
    /// Human-readable explanation, never carrying internal detail
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(
            "Not Found",
            "The requested resource was not found on this server.",
        )
    }

    pub fn internal() -> Self {
        Self::new("Internal Server Error", "Something went wrong!")
    }

    pub fn spec_unavailable() -> Self {
        Self::new(
            "Failed to load API specification",
            "The specification could not be retrieved from the backing store.",
        )
    }
}

/// Handler error that renders as a structured JSON response.
///
/// The wrapped strings are server-side detail: they are logged, the client
/// only ever sees the generic [`ErrorResponse`] for the variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Specification unavailable: {0}")]
    SpecUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound(detail) => {
                tracing::info!("Not found: {}", detail);
                ErrorResponse::not_found()
            }
            AppError::SpecUnavailable(detail) => {
                tracing::error!("Specification unavailable: {}", detail);
                ErrorResponse::spec_unavailable()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                ErrorResponse::internal()
            }
            AppError::SerdeJson(e) => {
                tracing::error!("JSON error: {:?}", e);
                ErrorResponse::internal()
            }
            AppError::InternalServerError(detail) => {
                tracing::error!("Internal server error: {}", detail);
                ErrorResponse::internal()
            }
        };

        (status, Json(body)).into_response()
    }
}
