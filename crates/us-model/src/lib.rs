//! # us-model
//!
//! Domain models for the user service.
//!
//! - [`UserRecord`] - the persisted identity entity
//! - [`ValidationError`] - a single violated field constraint

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod user;
pub mod validation;

pub use user::UserRecord;
pub use validation::ValidationError;
