//! Application state

use std::sync::Arc;
use std::time::Duration;

use tessera_auth_core::AuthService;

use crate::config::Config;
use crate::store::InMemoryUserStore;

/// Type alias for the auth service with the concrete store type
pub type AuthServiceImpl = AuthService<InMemoryUserStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for login, tokens and user lookups
    pub auth: Arc<AuthServiceImpl>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthServiceImpl, config: Config) -> Self {
        Self {
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }
}
