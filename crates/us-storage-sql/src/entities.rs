//! Database entity types for `SQLx`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use us_model::UserRecord;
use uuid::Uuid;

/// Database row for users.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: Option<String>,
    pub credential: Option<String>,
    pub age: Option<i32>,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: Some(row.id),
            email: row.email,
            credential: row.credential,
            age: row.age,
        }
    }
}
