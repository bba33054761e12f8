//! User domain model.
//!
//! A `UserRecord` doubles as the persisted entity and as the payload shape of
//! create and patch requests: every field is optional so that "absent" can be
//! told apart from "present" when a partial update is merged.

use std::fmt;

use uuid::Uuid;

/// A user account identified by email.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    /// Identifier assigned by the persistence layer on first save.
    pub id: Option<Uuid>,
    /// Email address, unique across all records.
    pub email: Option<String>,
    /// Encoded credential. Never rendered in any output representation.
    pub credential: Option<String>,
    /// Age, settable only at creation.
    pub age: Option<i32>,
}

impl UserRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the (already encoded) credential.
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Sets the age.
    #[must_use]
    pub const fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the identifier.
    #[must_use]
    pub const fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns `true` if the age falls in the half-open range `[min_age, max_age)`.
    #[must_use]
    pub fn age_within(&self, min_age: i32, max_age: i32) -> bool {
        self.age.is_some_and(|age| age >= min_age && age < max_age)
    }
}

// Credential is redacted so records can be logged safely.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("age", &self.age)
            .finish()
    }
}
