//! Configuration for the Auth API service.

use std::str::FromStr;
use std::time::Duration;

use tessera_auth_core::{KeyError, TokenConfig};

/// Credentials for an administrator seeded at startup
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Token signing and validity configuration
    pub token: TokenConfig,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,

    /// Administrator to create at startup
    pub admin: Option<AdminSeed>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Signing secret (required, checked up front)
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_secs: u64 = parse_or(&lookup, "JWT_ACCESS_TOKEN_VALIDITY_SECONDS", 3600)?;
        let refresh_secs: u64 =
            parse_or(&lookup, "JWT_REFRESH_TOKEN_VALIDITY_SECONDS", 1_209_600)?;

        let token = TokenConfig::try_new(secret)?
            .with_access_token_validity(Duration::from_secs(access_secs))
            .with_refresh_token_validity(Duration::from_secs(refresh_secs));

        // Server
        let http_port = parse_or(&lookup, "HTTP_PORT", 8080)?;

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        // Metrics
        let metrics_enabled = lookup("METRICS_ENABLED")
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        // Optional admin seed; both halves or neither
        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_EMAIL")),
        };

        Ok(Self {
            http_port,
            token,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            admin,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid JWT_SECRET: {0}")]
    Secret(#[from] KeyError),
}
