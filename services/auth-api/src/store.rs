//! In-memory user store
//!
//! Passwords are hashed with Argon2id. Hashing and verification run on the
//! blocking pool. A login for an unknown email is verified against a decoy
//! hash, so it costs the same as a wrong password for a known one.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tessera_auth_core::{NewUser, StoreError, UserRecord, UserStore};
use tessera_types::Authority;

/// Hash checked when the email is unknown; computed on first use
static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

struct StoredUser {
    record: UserRecord,
    password_hash: String,
}

/// User store backed by a concurrent map
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<DashMap<String, StoredUser>>,
    password_checks: Arc<AtomicU64>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an administrator unless one with this email already exists
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<(), StoreError> {
        let user = NewUser {
            email: email.to_string(),
            password: password.to_string(),
            nickname: "admin".to_string(),
            authorities: BTreeSet::from([
                Authority::User.as_str().to_string(),
                Authority::Admin.as_str().to_string(),
            ]),
        };

        match self.create(user).await {
            Ok(_) => {
                tracing::info!(email, "Seeded administrator");
                Ok(())
            }
            Err(StoreError::Duplicate(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Argon2 verifications run so far, decoy checks included
    pub fn password_checks(&self) -> u64 {
        self.password_checks.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .get(email)
            .map(|u| u.record.clone())
            .filter(|r| r.activated))
    }

    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let stored = self
            .users
            .get(email)
            .map(|u| (u.record.clone(), u.password_hash.clone()));
        let hash = stored.as_ref().map(|(_, hash)| hash.clone());

        let password = password.to_string();
        let checks = Arc::clone(&self.password_checks);
        let matches = tokio::task::spawn_blocking(move || {
            let matches = match hash {
                Some(hash) => verify_password(&password, &hash),
                None => {
                    if let Some(decoy) = decoy_hash() {
                        verify_password(&password, decoy);
                    }
                    false
                }
            };
            checks.fetch_add(1, Ordering::Relaxed);
            matches
        })
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(stored.and_then(|(record, _)| (matches && record.activated).then_some(record)))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        if self.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }

        let password = user.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))??;

        let record = UserRecord {
            email: user.email.clone(),
            nickname: user.nickname,
            authorities: user.authorities,
            activated: true,
        };

        // Re-checked under the entry lock; hashing happened outside it.
        match self.users.entry(user.email) {
            Entry::Occupied(entry) => Err(StoreError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(StoredUser {
                    record: record.clone(),
                    password_hash,
                });
                Ok(record)
            }
        }
    }

    async fn set_authorities(
        &self,
        email: &str,
        authorities: BTreeSet<String>,
    ) -> Result<(), StoreError> {
        let mut user = self
            .users
            .get_mut(email)
            .ok_or_else(|| StoreError::NotFound(email.to_string()))?;
        user.record.authorities = authorities;
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| StoreError::Backend(format!("password hashing failed: {e}")))
}

fn decoy_hash() -> Option<&'static str> {
    DECOY_HASH
        .get_or_init(|| match hash_password("tessera-decoy") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!(error = %e, "Failed to compute decoy password hash");
                None
            }
        })
        .as_deref()
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is unreadable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "password".to_string(),
            nickname: "nick".to_string(),
            authorities: BTreeSet::from(["ROLE_USER".to_string()]),
        }
    }

    #[test]
    fn test_hash_is_argon2id() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("password", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_create_and_verify() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@b.com")).await.unwrap();

        assert!(store
            .verify_password("a@b.com", "password")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .verify_password("a@b.com", "nope")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .verify_password("x@b.com", "password")
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_decoy_hash_is_argon2id() {
        let decoy = decoy_hash().unwrap();
        assert!(decoy.starts_with("$argon2id$"));
        assert!(!verify_password("password", decoy));
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_hasher() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@b.com")).await.unwrap();
        assert_eq!(store.password_checks(), 0);

        let unknown = store.verify_password("x@b.com", "password").await.unwrap();
        assert!(unknown.is_none());
        assert_eq!(store.password_checks(), 1);

        let wrong = store.verify_password("a@b.com", "nope").await.unwrap();
        assert!(wrong.is_none());
        assert_eq!(store.password_checks(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@b.com")).await.unwrap();
        let err = store.create(new_user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_set_authorities() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@b.com")).await.unwrap();
        store
            .set_authorities(
                "a@b.com",
                BTreeSet::from(["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]),
            )
            .await
            .unwrap();

        let user = store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert!(user.authorities.contains("ROLE_ADMIN"));

        let err = store
            .set_authorities("x@b.com", BTreeSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let store = InMemoryUserStore::new();
        store.seed_admin("root@b.com", "rootpw").await.unwrap();
        store.seed_admin("root@b.com", "rootpw").await.unwrap();

        let admin = store.find_by_email("root@b.com").await.unwrap().unwrap();
        assert!(admin.authorities.contains("ROLE_ADMIN"));
        assert!(admin.authorities.contains("ROLE_USER"));
        assert_eq!(store.len(), 1);
    }
}
