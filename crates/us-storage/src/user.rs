//! User storage provider trait.

use async_trait::async_trait;
use us_model::UserRecord;
use uuid::Uuid;

use crate::error::StorageResult;

/// Persistence collaborator for user records.
///
/// Implementations must be thread-safe and support concurrent access.
/// Implementations should also enforce email uniqueness themselves: the
/// account service checks uniqueness before writing, but that check and the
/// subsequent write are not atomic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by email.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserRecord>>;

    /// Gets a user whose email and encoded credential both match exactly.
    async fn find_by_email_and_credential(
        &self,
        email: &str,
        credential: &str,
    ) -> StorageResult<Option<UserRecord>>;

    /// Lists users with `min_age <= age < max_age` in the backend's natural order.
    async fn find_by_age_range(&self, min_age: i32, max_age: i32)
    -> StorageResult<Vec<UserRecord>>;

    /// Inserts the record if it has no `id`, otherwise overwrites the stored one.
    ///
    /// Returns the stored record, with its `id` assigned on insert.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if the email belongs to another record.
    async fn save(&self, user: &UserRecord) -> StorageResult<UserRecord>;

    /// Deletes a user by ID. Deleting an unknown ID is not an error.
    async fn delete_by_id(&self, id: Uuid) -> StorageResult<()>;
}
