//! Authentication types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Header carrying the refresh token
pub const REFRESH_HEADER: &str = "Refresh";

/// Credential scheme prefix, including the separating space
pub const BEARER_PREFIX: &str = "Bearer ";

/// Format a token as a bearer credential
pub fn bearer(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

/// Strip the bearer prefix from a header value
///
/// Returns `None` when the prefix is missing or nothing follows it.
pub fn strip_bearer(value: &str) -> Option<&str> {
    value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.trim().is_empty())
}

/// Well-known authorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Authority {
    /// Authority name as stored and as carried in tokens
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kind
///
/// Decides the claim shape and the validity duration of an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token granting resource access
    Access,
    /// Long-lived token granting only the issuance of a new access token
    Refresh,
}

impl TokenKind {
    /// Lowercase name, used in logs and metric labels
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity: a subject and the authorities it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique login identifier (the user's email)
    pub subject: String,
    /// Role names
    pub authorities: BTreeSet<String>,
}

impl Identity {
    /// Create an identity with the given authorities
    pub fn new<I, A>(subject: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            subject: subject.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Rebuild an identity from a comma-joined authorities claim
    pub fn from_claim(subject: impl Into<String>, authorities: &str) -> Self {
        Self {
            subject: subject.into(),
            authorities: authorities
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Comma-joined authorities, as carried in an access token
    pub fn authorities_claim(&self) -> String {
        self.authorities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check if the identity holds an authority
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// Check if the identity holds any of the given authorities
    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        authorities.iter().any(|a| self.has_authority(a))
    }
}
