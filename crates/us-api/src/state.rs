//! Shared handler state.

use std::sync::Arc;

use us_account::AccountService;
use us_auth::CredentialEncoder;
use us_storage::UserRepository;

/// User API state.
///
/// Wraps the account service in an `Arc` so cloning per request is cheap.
pub struct UserState<U: ?Sized, E> {
    /// Account operations.
    pub service: Arc<AccountService<U, E>>,
}

// Manual Clone implementation that doesn't require U: Clone or E: Clone
impl<U: ?Sized, E> Clone for UserState<U, E> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<U, E> UserState<U, E>
where
    U: UserRepository + ?Sized,
    E: CredentialEncoder,
{
    /// Creates a new state around an account service.
    pub fn new(service: AccountService<U, E>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
