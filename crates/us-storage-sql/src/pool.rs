//! Connection pool and schema setup.

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use us_storage::{StorageError, StorageResult};

/// Embedded schema migrations.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connection settings for the user database.
///
/// An `idle_timeout` of `None` keeps idle connections open until the pool
/// shrinks back to `min_connections` on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Database connection URL.
    pub url: String,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// How long an idle connection is kept above the minimum.
    pub idle_timeout: Option<Duration>,
}

impl PoolConfig {
    /// Default minimum pool size.
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    /// Default maximum pool size.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    /// Default acquire timeout.
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default idle timeout.
    pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

    /// Creates a configuration for `url` with the default limits.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_connections: Self::DEFAULT_MIN_CONNECTIONS,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: Some(Self::DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Sets the pool size bounds.
    #[must_use]
    pub const fn connections(mut self, min: u32, max: u32) -> Self {
        self.min_connections = min;
        self.max_connections = max;
        self
    }

    /// Sets the acquire timeout.
    #[must_use]
    pub const fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets the idle timeout; `None` disables it.
    #[must_use]
    pub const fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }

    /// Opens the pool.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the database is unreachable.
    pub async fn connect(&self) -> StorageResult<PgPool> {
        let pool = self
            .options()
            .connect(&self.url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::info!(
            min = self.min_connections,
            max = self.max_connections,
            "Database connection pool created"
        );
        Ok(pool)
    }
}

/// Applies the embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> StorageResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Internal(format!("Migration failed: {e}")))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
