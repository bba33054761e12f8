//! # us-server
//!
//! Axum server for the user service.
//!
//! Wires the storage backend chosen by [`ServerConfig`] into the account
//! service and serves the user API alongside health endpoints.
//!
//! ## Usage
//!
//! ```ignore
//! use us_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let server = Server::new(config).await?;
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod providers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::providers::SharedUserRepository;

/// The user service server.
pub struct Server {
    config: ServerConfig,
    repository: SharedUserRepository,
}

impl Server {
    /// Creates a new server instance.
    ///
    /// Opens the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialised.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let repository = providers::user_repository(&config).await?;
        Ok(Self { config, repository })
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving fails.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with_shutdown(shutdown_signal()).await
    }

    /// Runs the server until `signal` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving fails.
    pub async fn run_with_shutdown<F>(self, signal: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("Server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Builds the application router without starting the server.
    pub fn router(&self) -> Router {
        let state = AppState::new(self.config.clone(), self.repository.clone());
        create_router(state)
    }
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
