//! Credential encoders.

use base64::{Engine, engine::general_purpose::STANDARD};

/// Transforms a plaintext secret into its stored, comparable form.
///
/// Implementations must be deterministic and total: the same input always
/// yields the same output, and every string (including the empty string)
/// has an encoding.
pub trait CredentialEncoder: Send + Sync {
    /// Encodes a plaintext secret.
    fn encode(&self, plaintext: &str) -> String;
}

/// Standard-alphabet, padded Base64 of the UTF-8 bytes of the secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64CredentialEncoder;

impl Base64CredentialEncoder {
    /// Creates a new encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialEncoder for Base64CredentialEncoder {
    fn encode(&self, plaintext: &str) -> String {
        STANDARD.encode(plaintext.as_bytes())
    }
}
