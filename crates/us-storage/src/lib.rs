//! # us-storage
//!
//! Storage abstraction for the user service.
//!
//! This crate defines the [`UserRepository`] interface that concrete
//! backends implement, plus an in-memory backend used for local runs and
//! tests. The PostgreSQL backend lives in `us-storage-sql`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod user;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryUserRepository;
pub use user::UserRepository;
