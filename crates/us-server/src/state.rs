//! Application state management.

use us_account::{AccountService, ConstraintEngine};
use us_api::UserState;
use us_auth::Base64CredentialEncoder;
use us_storage::UserRepository;

use crate::config::ServerConfig;
use crate::providers::SharedUserRepository;

/// Handler state for the user API as wired by the server.
pub type ServerUserState = UserState<dyn UserRepository, Base64CredentialEncoder>;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,

    /// User API state.
    pub users: ServerUserState,
}

impl AppState {
    /// Creates a new application state on top of a repository.
    pub fn new(config: ServerConfig, repository: SharedUserRepository) -> Self {
        let service = AccountService::new(
            repository,
            ConstraintEngine::new(),
            Base64CredentialEncoder::new(),
        );
        Self {
            config,
            users: UserState::new(service),
        }
    }
}
