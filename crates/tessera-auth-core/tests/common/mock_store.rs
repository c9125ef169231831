//! Mock user store for testing

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use dashmap::DashMap;
use tessera_auth_core::{NewUser, StoreError, TokenConfig, UserRecord, UserStore};

/// Password every seeded user is created with
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "secret-password";

/// Token config with a fixed 64-byte secret
#[allow(dead_code)]
pub fn test_config() -> TokenConfig {
    TokenConfig::new(STANDARD.encode([11u8; 64]))
}

/// In-memory user store; passwords are kept in plain text
#[derive(Default, Clone)]
pub struct MockUserStore {
    users: Arc<DashMap<String, (UserRecord, String)>>,
}

impl MockUserStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    #[allow(dead_code)]
    pub fn insert_user(&self, email: &str, authorities: &[&str]) {
        let record = UserRecord {
            email: email.to_string(),
            nickname: "tester".to_string(),
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
            activated: true,
        };
        self.users
            .insert(email.to_string(), (record, TEST_PASSWORD.to_string()));
    }

    /// Remove a user
    #[allow(dead_code)]
    pub fn remove_user(&self, email: &str) {
        self.users.remove(email);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .get(email)
            .map(|r| r.value().0.clone())
            .filter(|u| u.activated))
    }

    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .get(email)
            .filter(|r| r.value().1 == password)
            .map(|r| r.value().0.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        if self.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }
        let record = UserRecord {
            email: user.email.clone(),
            nickname: user.nickname,
            authorities: user.authorities,
            activated: true,
        };
        self.users
            .insert(user.email, (record.clone(), user.password));
        Ok(record)
    }

    async fn set_authorities(
        &self,
        email: &str,
        authorities: BTreeSet<String>,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .users
            .get_mut(email)
            .ok_or_else(|| StoreError::NotFound(email.to_string()))?;
        entry.0.authorities = authorities;
        Ok(())
    }
}
