//! Storage backend selection.

use std::sync::Arc;

use us_storage::{InMemoryUserRepository, UserRepository};
use us_storage_sql::PgUserRepository;

use crate::config::ServerConfig;

/// Type-erased user repository shared by all handlers.
pub type SharedUserRepository = Arc<dyn UserRepository>;

/// Opens the user repository selected by the configuration.
///
/// With a `DATABASE_URL` this connects to `PostgreSQL` and, unless disabled,
/// applies the embedded migrations. Otherwise records live in memory and are
/// lost on restart.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn user_repository(config: &ServerConfig) -> anyhow::Result<SharedUserRepository> {
    let Some(pool_config) = config.pool_config() else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    let pool = pool_config.connect().await?;

    if config.db_run_migrations {
        us_storage_sql::run_migrations(&pool).await?;
    }

    Ok(Arc::new(PgUserRepository::new(pool)))
}
