//! User store interface
//!
//! Authorities are always resolved through the store; tokens never act as
//! the source of truth for a user's roles.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tessera_types::{Identity, UserResponse};
use thiserror::Error;

/// A stored user, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub nickname: String,
    pub authorities: BTreeSet<String>,
    pub activated: bool,
}

impl UserRecord {
    /// Identity with the user's current authorities
    pub fn identity(&self) -> Identity {
        Identity::new(self.email.clone(), self.authorities.iter().cloned())
    }
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            email: user.email,
            nickname: user.nickname,
            authorities: user.authorities.into_iter().collect(),
        }
    }
}

/// Create user input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub authorities: BTreeSet<String>,
}

/// User store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("duplicate user: {0}")]
    Duplicate(String),

    /// No user with this email
    #[error("user not found: {0}")]
    NotFound(String),

    /// Backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// User store trait
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find an activated user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Check a password; returns the user only when it matches
    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Replace a user's authorities
    async fn set_authorities(
        &self,
        email: &str,
        authorities: BTreeSet<String>,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_identity() {
        let record = UserRecord {
            email: "a@b.com".into(),
            nickname: "abc".into(),
            authorities: ["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()].into(),
            activated: true,
        };
        let identity = record.identity();
        assert_eq!(identity.subject, "a@b.com");
        assert_eq!(identity.authorities_claim(), "ROLE_ADMIN,ROLE_USER");

        let response = UserResponse::from(record);
        assert_eq!(response.authorities, vec!["ROLE_ADMIN", "ROLE_USER"]);
    }
}
