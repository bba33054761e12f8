//! Validation error model.

use serde::{Deserialize, Serialize};

/// A single violated field constraint.
///
/// A failed validation yields an ordered list of these, one per violation,
/// in the order the constraints were evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the offending field as seen by clients (e.g. `email`).
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
