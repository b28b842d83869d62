//! Unified error handling.
//!
//! Provides a unified `AppError` type mapped onto HTTP responses with a JSON
//! `{"message"}` body. All route handlers return `Result<T, AppError>`.
//! There are no retries and no partial-success states: a mutation either
//! fully commits to memory and storage or the request fails.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use artiva_core::CategoryError;

use crate::services::auth::AuthError;
use crate::services::images::UploadError;
use crate::store::snapshot::StoreError;

/// Application-level error type for the catalog backend.
#[derive(Debug, Error)]
pub enum AppError {
    /// An id lookup missed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request payload or missing required field.
    #[error("validation error: {0}")]
    Validation(String),

    /// An upload violated the image constraints.
    #[error("upload rejected: {0}")]
    Upload(#[from] UploadError),

    /// The credential check failed.
    #[error("invalid credentials")]
    Unauthorized(#[from] AuthError),

    /// Snapshot persistence failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// JSON error body, `{"message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Persistence failures are logged with full detail and answered
        // with a generic message.
        if matches!(self, Self::Store(_) | Self::Upload(UploadError::Io(_))) {
            tracing::error!(error = %self, "request failed");
        }

        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            // The upload transport reports malformed payloads as a generic
            // processing failure.
            Self::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload(UploadError::Io(_)) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose storage detail to clients
        let message = match &self {
            Self::Store(_) | Self::Upload(UploadError::Io(_)) => {
                "Internal server error".to_owned()
            }
            Self::Unauthorized(_) => "Invalid credentials".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("product 9".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("bad payload".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Upload(UploadError::TooLarge)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_upload_io_failure_is_masked_as_internal() {
        let err = AppError::Upload(UploadError::Io(std::io::Error::other("disk gone")));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display() {
        let err = AppError::NotFound("product 123".to_owned());
        assert_eq!(err.to_string(), "not found: product 123");
    }
}
