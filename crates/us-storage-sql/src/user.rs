//! `PostgreSQL` implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use us_model::UserRecord;
use us_storage::{StorageError, StorageResult, UserRepository};
use uuid::Uuid;

use crate::entities::UserRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` user repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a new `PostgreSQL` user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &UserRecord) -> StorageResult<UserRow> {
        sqlx::query_as(
            r"INSERT INTO users (id, email, credential, age, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&user.email)
        .bind(&user.credential)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, user))
    }

    async fn upsert(&self, id: Uuid, user: &UserRecord) -> StorageResult<UserRow> {
        sqlx::query_as(
            r"INSERT INTO users (id, email, credential, age, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                credential = EXCLUDED.credential,
                age = EXCLUDED.age,
                updated_at = NOW()
            RETURNING *",
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.credential)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, user))
    }
}

/// Reports unique violations against the email being written.
fn duplicate_email(err: sqlx::Error, user: &UserRecord) -> StorageError {
    let err = from_sqlx_error(err);
    if err.is_duplicate() {
        StorageError::duplicate("email", user.email.clone().unwrap_or_default())
    } else {
        err
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_email_and_credential(
        &self,
        email: &str,
        credential: &str,
    ) -> StorageResult<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT * FROM users WHERE email = $1 AND credential = $2")
                .bind(email)
                .bind(credential)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> StorageResult<Vec<UserRecord>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT * FROM users WHERE age >= $1 AND age < $2 ORDER BY created_at, id",
        )
        .bind(min_age)
        .bind(max_age)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn save(&self, user: &UserRecord) -> StorageResult<UserRecord> {
        let row = match user.id {
            Some(id) => self.upsert(id, user).await?,
            None => self.insert(user).await?,
        };

        Ok(UserRecord::from(row))
    }

    async fn delete_by_id(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!(user_id = %id, "Delete matched no rows");
        }

        Ok(())
    }
}
