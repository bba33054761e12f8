//! # us-storage-sql
//!
//! SQLx-based storage implementation for the user service.
//!
//! This crate provides `PostgreSQL` storage using `SQLx`. The schema is
//! shipped as embedded migrations, see [`run_migrations`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod entities;
mod error;
pub mod pool;
pub mod user;

pub use error::from_sqlx_error;
pub use pool::{PoolConfig, run_migrations};
pub use user::PgUserRepository;
