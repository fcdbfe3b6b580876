use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Document '{location}' could not be fetched: {reason}")]
    DocumentNotFound { location: String, reason: String },

    #[error("Document '{location}' is not a valid specification: {reason}")]
    DocumentParse { location: String, reason: String },

    #[error("Specification store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Derived key '{0}' is not usable as a route segment")]
    InvalidKey(String),

    #[error("Key '{0}' is already taken by another document")]
    DuplicateKey(String),

    #[error("Template '{path}' could not be loaded: {reason}")]
    Template { path: String, reason: String },
}

pub type SpecResult<T> = Result<T, SpecError>;

impl SpecError {
    pub fn not_found(location: impl Into<String>, reason: impl ToString) -> Self {
        SpecError::DocumentNotFound {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(location: impl Into<String>, reason: impl ToString) -> Self {
        SpecError::DocumentParse {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert SpecError to AppError for standardized error responses
impl From<SpecError> for AppError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::DocumentNotFound { .. } | SpecError::StoreUnavailable(_) => {
                AppError::SpecUnavailable(err.to_string())
            }
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for SpecError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
