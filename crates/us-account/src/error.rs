//! Account operation errors.

use thiserror::Error;
use us_model::ValidationError;
use us_storage::StorageError;

/// Errors returned by account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more field constraints were violated.
    ///
    /// Always carries the complete list, in evaluation order.
    #[error("validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// No user exists with the given email.
    #[error("User not found: {email}")]
    NotFound {
        /// Email used as the lookup key.
        email: String,
    },

    /// Unknown email or wrong secret. The two cases are indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Persistence failure, propagated unchanged.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AccountError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(email: impl Into<String>) -> Self {
        Self::NotFound {
            email: email.into(),
        }
    }

    /// Returns the validation errors, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type for account operations.
pub type AccountResult<T> = Result<T, AccountError>;
