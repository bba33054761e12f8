//! # us-account
//!
//! Account management core for the user service.
//!
//! ## Modules
//!
//! - [`validation`] - constraint engine evaluating a rule table per mode
//! - [`merge`] - partial update merge
//! - [`service`] - the five account operations
//! - [`error`] - account error taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use us_account::{AccountService, ConstraintEngine};
//! use us_auth::Base64CredentialEncoder;
//! use us_storage::InMemoryUserRepository;
//!
//! let service = AccountService::new(
//!     Arc::new(InMemoryUserRepository::new()),
//!     ConstraintEngine::new(),
//!     Base64CredentialEncoder::new(),
//! );
//! let created = service.create(payload).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod merge;
pub mod service;
pub mod validation;

pub use error::{AccountError, AccountResult};
pub use merge::merge;
pub use service::AccountService;
pub use validation::{Constraint, ConstraintEngine, Field, Rule, ValidationMode};
