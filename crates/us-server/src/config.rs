//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured if present.

use std::str::FromStr;
use std::time::Duration;

use us_storage_sql::PoolConfig;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port. `0` picks an ephemeral port.
    pub port: u16,

    /// Database connection URL. `None` selects in-memory storage.
    pub database_url: Option<String>,

    /// Minimum database connections.
    pub db_min_connections: u32,

    /// Maximum database connections.
    pub db_max_connections: u32,

    /// Seconds a request waits for a free database connection.
    pub db_acquire_timeout_secs: u64,

    /// Seconds an idle connection above the minimum is kept. `0` disables.
    pub db_idle_timeout_secs: u64,

    /// Apply embedded migrations on startup.
    pub db_run_migrations: bool,

    /// CORS allowed origins (comma-separated in the environment).
    pub cors_origins: Vec<String>,

    /// Log filter directive.
    pub log_level: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// connection limits are inconsistent.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = lookup("US_HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "US_PORT", defaults.port)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let db_min_connections =
            parse_var(&lookup, "US_DB_MIN_CONNECTIONS", defaults.db_min_connections)?;
        let db_max_connections =
            parse_var(&lookup, "US_DB_MAX_CONNECTIONS", defaults.db_max_connections)?;
        if db_min_connections > db_max_connections {
            anyhow::bail!(
                "US_DB_MIN_CONNECTIONS ({db_min_connections}) exceeds US_DB_MAX_CONNECTIONS ({db_max_connections})"
            );
        }

        let db_acquire_timeout_secs = parse_var(
            &lookup,
            "US_DB_ACQUIRE_TIMEOUT_SECS",
            defaults.db_acquire_timeout_secs,
        )?;
        let db_idle_timeout_secs =
            parse_var(&lookup, "US_DB_IDLE_TIMEOUT_SECS", defaults.db_idle_timeout_secs)?;

        let db_run_migrations = lookup("US_DB_RUN_MIGRATIONS")
            .map_or(defaults.db_run_migrations, |v| {
                v.to_lowercase() != "false" && v != "0"
            });

        let cors_origins = lookup("US_CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
            s.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect()
        });

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        Ok(Self {
            host,
            port,
            database_url,
            db_min_connections,
            db_max_connections,
            db_acquire_timeout_secs,
            db_idle_timeout_secs,
            db_run_migrations,
            cors_origins,
            log_level,
        })
    }

    /// Creates a configuration for testing.
    ///
    /// Binds to an ephemeral loopback port with in-memory storage.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }

    /// Returns `true` if the in-memory backend is selected.
    #[must_use]
    pub const fn uses_memory_storage(&self) -> bool {
        self.database_url.is_none()
    }

    /// Returns the pool settings, or `None` when running on in-memory storage.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let idle_timeout =
            (self.db_idle_timeout_secs > 0).then(|| Duration::from_secs(self.db_idle_timeout_secs));

        Some(
            PoolConfig::new(url)
                .connections(self.db_min_connections, self.db_max_connections)
                .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
                .idle_timeout(idle_timeout),
        )
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
            db_min_connections: PoolConfig::DEFAULT_MIN_CONNECTIONS,
            db_max_connections: PoolConfig::DEFAULT_MAX_CONNECTIONS,
            db_acquire_timeout_secs: PoolConfig::DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
            db_idle_timeout_secs: PoolConfig::DEFAULT_IDLE_TIMEOUT.as_secs(),
            db_run_migrations: true,
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {key} ({raw:?}): {e}")),
        None => Ok(default),
    }
}
