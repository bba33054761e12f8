//! User DTOs for the HTTP API.

use serde::{Deserialize, Serialize};
use us_model::UserRecord;

/// Body of create and patch requests.
///
/// Every field is optional; on patch only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Age. Rejected on patch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl From<UserRequest> for UserRecord {
    fn from(request: UserRequest) -> Self {
        Self {
            id: None,
            email: request.email,
            credential: request.password,
            age: request.age,
        }
    }
}

/// Login attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Query parameters for the age range listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRangeParams {
    /// Inclusive lower bound.
    pub min_age: i32,
    /// Exclusive upper bound.
    pub max_age: i32,
}

/// User representation for API responses.
///
/// Carries neither the identifier nor the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRepresentation {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl From<UserRecord> for UserRepresentation {
    fn from(user: UserRecord) -> Self {
        Self {
            email: user.email,
            age: user.age,
        }
    }
}
