//! Signing key material
//!
//! The key is derived once from the configured base64 secret and shared
//! read-only for the rest of the process lifetime.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use jsonwebtoken::{DecodingKey, EncodingKey};

/// Pre-derived HMAC key for signing and verifying tokens.
///
/// Cloning is cheap; all clones share the same key material.
#[derive(Clone)]
pub struct SigningKey {
    inner: Arc<KeyMaterial>,
}

struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
    len: usize,
}

impl SigningKey {
    /// Minimum key length in bytes (512 bits, the HS512 block size)
    pub const MIN_KEY_LENGTH: usize = 64;

    /// Derive a key from a base64-encoded secret.
    ///
    /// # Errors
    /// Returns error if the secret is not valid base64 or decodes to fewer
    /// than [`Self::MIN_KEY_LENGTH`] bytes.
    pub fn from_base64(secret: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|e| KeyError::InvalidBase64(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Create a key from raw bytes.
    ///
    /// # Errors
    /// Returns error if the key is shorter than [`Self::MIN_KEY_LENGTH`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(KeyError::KeyTooShort {
                actual: bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            inner: Arc::new(KeyMaterial {
                encoding: EncodingKey::from_secret(bytes),
                decoding: DecodingKey::from_secret(bytes),
                len: bytes.len(),
            }),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Always false; a key is never empty once constructed
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.inner.len)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when deriving the signing key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("signing secret is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}
