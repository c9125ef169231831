//! Configuration types for token issuance

use std::time::Duration;

use crate::crypto::{KeyError, SigningKey};

/// Default access token validity (1 hour)
pub const DEFAULT_ACCESS_TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Default refresh token validity (14 days)
pub const DEFAULT_REFRESH_TOKEN_VALIDITY: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Token configuration
///
/// Read once at startup. The secret is kept only long enough to derive the
/// signing key.
#[derive(Clone)]
pub struct TokenConfig {
    /// Base64-encoded HMAC secret
    secret: String,
    /// Access token validity
    pub access_token_validity: Duration,
    /// Refresh token validity
    pub refresh_token_validity: Duration,
}

impl TokenConfig {
    /// Create a config with default validity durations
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_validity: DEFAULT_ACCESS_TOKEN_VALIDITY,
            refresh_token_validity: DEFAULT_REFRESH_TOKEN_VALIDITY,
        }
    }

    /// Create a config and check the secret up front
    pub fn try_new(secret: impl Into<String>) -> Result<Self, KeyError> {
        let config = Self::new(secret);
        config.signing_key()?;
        Ok(config)
    }

    /// Set access token validity
    pub fn with_access_token_validity(mut self, validity: Duration) -> Self {
        self.access_token_validity = validity;
        self
    }

    /// Set refresh token validity
    pub fn with_refresh_token_validity(mut self, validity: Duration) -> Self {
        self.refresh_token_validity = validity;
        self
    }

    /// Derive the signing key from the configured secret
    pub fn signing_key(&self) -> Result<SigningKey, KeyError> {
        SigningKey::from_base64(&self.secret)
    }

    /// Whether refresh tokens outlive access tokens
    pub fn refresh_outlives_access(&self) -> bool {
        self.refresh_token_validity > self.access_token_validity
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_token_validity", &self.access_token_validity)
            .field("refresh_token_validity", &self.refresh_token_validity)
            .finish()
    }
}
