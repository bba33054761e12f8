//! In-memory user repository.
//!
//! Records are kept in insertion order, which is the natural order returned
//! by range queries. Email uniqueness is enforced under the write lock, so
//! concurrent creates for the same email cannot both succeed.

use async_trait::async_trait;
use tokio::sync::RwLock;
use us_model::UserRecord;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::user::UserRepository;

/// Volatile user repository backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_email_and_credential(
        &self,
        email: &str,
        credential: &str,
    ) -> StorageResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email) && u.credential.as_deref() == Some(credential))
            .cloned())
    }

    async fn find_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> StorageResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.age_within(min_age, max_age))
            .cloned()
            .collect())
    }

    async fn save(&self, user: &UserRecord) -> StorageResult<UserRecord> {
        let mut users = self.users.write().await;

        if let Some(ref email) = user.email {
            let taken = users
                .iter()
                .any(|u| u.email.as_ref() == Some(email) && (user.id.is_none() || u.id != user.id));
            if taken {
                return Err(StorageError::duplicate("email", email));
            }
        }

        let mut stored = user.clone();
        match stored.id {
            Some(id) => {
                if let Some(slot) = users.iter_mut().find(|u| u.id == Some(id)) {
                    *slot = stored.clone();
                } else {
                    users.push(stored.clone());
                }
            }
            None => {
                let id = Uuid::now_v7();
                stored.id = Some(id);
                users.push(stored.clone());
                tracing::debug!(user_id = %id, "Inserted user");
            }
        }

        Ok(stored)
    }

    async fn delete_by_id(&self, id: Uuid) -> StorageResult<()> {
        self.users.write().await.retain(|u| u.id != Some(id));
        Ok(())
    }
}
