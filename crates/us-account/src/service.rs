//! Account service.
//!
//! Orchestrates the five account operations on top of a [`UserRepository`]:
//! validate the payload for the operation's mode, encode any secret, merge
//! partial updates, then persist. Each call is an independent request; the
//! service itself holds no mutable state.

use std::sync::Arc;

use us_auth::CredentialEncoder;
use us_model::UserRecord;
use us_storage::UserRepository;

use crate::error::{AccountError, AccountResult};
use crate::merge::merge;
use crate::validation::{ConstraintEngine, ValidationMode};

/// User account operations.
pub struct AccountService<U: ?Sized, E> {
    repository: Arc<U>,
    engine: ConstraintEngine,
    encoder: E,
}

impl<U, E> AccountService<U, E>
where
    U: UserRepository + ?Sized,
    E: CredentialEncoder,
{
    /// Creates a new account service.
    pub fn new(repository: Arc<U>, engine: ConstraintEngine, encoder: E) -> Self {
        Self {
            repository,
            engine,
            encoder,
        }
    }

    /// Returns the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<U> {
        &self.repository
    }

    /// Creates a new user.
    ///
    /// Any client-supplied `id` is discarded; the repository assigns one.
    ///
    /// # Errors
    ///
    /// - `AccountError::ValidationFailed` if the payload violates a create constraint.
    /// - `AccountError::Storage` if the repository fails.
    pub async fn create(&self, payload: UserRecord) -> AccountResult<UserRecord> {
        self.validate(&payload, ValidationMode::Create).await?;

        let user = UserRecord {
            id: None,
            credential: payload.credential.as_deref().map(|c| self.encoder.encode(c)),
            ..payload
        };

        let stored = self.repository.save(&user).await?;
        tracing::info!(user_id = ?stored.id, "User created");
        Ok(stored)
    }

    /// Applies a partial update to the user identified by `email`.
    ///
    /// `email` is the lookup key; an email inside `partial` becomes the new
    /// value.
    ///
    /// # Errors
    ///
    /// - `AccountError::ValidationFailed` if the payload violates a patch constraint.
    /// - `AccountError::NotFound` if no user has the given email.
    /// - `AccountError::Storage` if the repository fails.
    pub async fn patch(&self, email: &str, partial: UserRecord) -> AccountResult<UserRecord> {
        self.validate(&partial, ValidationMode::Patch).await?;

        let existing = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::not_found(email))?;

        let partial = UserRecord {
            credential: partial.credential.as_deref().map(|c| self.encoder.encode(c)),
            ..partial
        };

        let stored = self.repository.save(&merge(existing, partial)).await?;
        tracing::info!(user_id = ?stored.id, "User updated");
        Ok(stored)
    }

    /// Deletes the user identified by `email`. A missing user is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the repository fails.
    pub async fn delete(&self, email: &str) -> AccountResult<()> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::debug!("Delete requested for unknown user");
            return Ok(());
        };

        if let Some(id) = user.id {
            self.repository.delete_by_id(id).await?;
            tracing::info!(user_id = %id, "User deleted");
        }

        Ok(())
    }

    /// Lists users with `min_age <= age < max_age`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the repository fails.
    pub async fn query(&self, min_age: i32, max_age: i32) -> AccountResult<Vec<UserRecord>> {
        Ok(self.repository.find_by_age_range(min_age, max_age).await?)
    }

    /// Checks a login attempt.
    ///
    /// Returns `true` iff a user exists with that email whose stored
    /// credential equals the encoded secret. Never reveals which part failed.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the repository fails.
    pub async fn authenticate(&self, email: &str, secret: &str) -> AccountResult<bool> {
        let encoded = self.encoder.encode(secret);
        let success = self
            .repository
            .find_by_email_and_credential(email, &encoded)
            .await?
            .is_some();

        tracing::info!(success, "Login attempt");
        Ok(success)
    }

    /// Like [`authenticate`](Self::authenticate), but fails on a mismatch.
    ///
    /// # Errors
    ///
    /// - `AccountError::AuthenticationFailed` if the credentials do not match.
    /// - `AccountError::Storage` if the repository fails.
    pub async fn login(&self, email: &str, secret: &str) -> AccountResult<()> {
        if self.authenticate(email, secret).await? {
            Ok(())
        } else {
            Err(AccountError::AuthenticationFailed)
        }
    }

    async fn validate(&self, payload: &UserRecord, mode: ValidationMode) -> AccountResult<()> {
        let errors = self
            .engine
            .validate(self.repository.as_ref(), payload, mode)
            .await?;

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::warn!(?mode, count = errors.len(), "Constraint violations");
            Err(AccountError::ValidationFailed(errors))
        }
    }
}
