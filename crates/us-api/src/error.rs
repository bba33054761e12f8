//! API error types.
//!
//! Maps account errors to HTTP responses. Validation failures are returned
//! as a JSON array of `{field, message}` objects and login failures as a
//! plain-text body; everything else uses [`ErrorResponse`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use us_account::AccountError;
use us_model::ValidationError;
use us_storage::StorageError;

/// Body returned on a failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed!";

/// Errors that can occur in the user API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Constraint violations on the request body.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// No user with the given email.
    #[error("User not found: {email}")]
    NotFound {
        /// Email used as the lookup key.
        email: String,
    },

    /// Credentials did not match.
    #[error("Login failed!")]
    Unauthorized,

    /// Storage layer error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::ValidationFailed(errors) => Self::Validation(errors),
            AccountError::NotFound { email } => Self::NotFound { email },
            AccountError::AuthenticationFailed => Self::Unauthorized,
            AccountError::Storage(err) => Self::Storage(err),
        }
    }
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(StorageError::Duplicate { .. }) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Storage(StorageError::Duplicate { .. }) => "conflict",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error: String,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            Self::Unauthorized => (status, LOGIN_FAILED_MESSAGE).into_response(),
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "Request failed");
                }
                let body = ErrorResponse {
                    error: other.error_code().to_string(),
                    error_description: Some(other.to_string()),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
