//! # us-auth
//!
//! Credential encoding for the user service.
//!
//! Stored credentials and login attempts pass through the same
//! [`CredentialEncoder`], so authentication reduces to an exact match on the
//! encoded form.
//!
//! ## Security
//!
//! [`Base64CredentialEncoder`] is a reversible text encoding, not a hash. It
//! is kept for compatibility with existing stored data. A deployment holding
//! real secrets should plug in a salted one-way scheme instead, which also
//! means login can no longer be a lookup by encoded value.
//!
//! ## Example
//!
//! ```
//! use us_auth::{Base64CredentialEncoder, CredentialEncoder};
//!
//! let encoder = Base64CredentialEncoder::new();
//! assert_eq!(encoder.encode("password"), "cGFzc3dvcmQ=");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod encoder;

pub use encoder::{Base64CredentialEncoder, CredentialEncoder};
