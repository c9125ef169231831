//! Authentication context types.
//!
//! The [`AuthenticationOutcome`] is recorded in the request extensions by the
//! authentication layer and read back by the extractors. It lives only for
//! the duration of one request.

use tessera_auth_core::ErrorKind;
use tessera_types::Identity;

/// Result of inspecting a request's bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// The credential validated; the principal is bound to the request.
    Authenticated(AuthContext),
    /// A credential was presented but rejected for the recorded reason.
    Rejected(ErrorKind),
}

impl AuthenticationOutcome {
    /// The bound context, if authenticated.
    #[must_use]
    pub fn context(&self) -> Option<&AuthContext> {
        match self {
            Self::Authenticated(ctx) => Some(ctx),
            Self::Rejected(_) => None,
        }
    }

    /// The recorded failure reason, if rejected.
    #[must_use]
    pub fn failure(&self) -> Option<ErrorKind> {
        match self {
            Self::Authenticated(_) => None,
            Self::Rejected(kind) => Some(*kind),
        }
    }
}

/// Authenticated principal bound to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject and authorities parsed from the access token.
    pub principal: Identity,
    /// The access token as presented.
    pub raw_token: String,
}

impl AuthContext {
    /// Create a new auth context.
    #[must_use]
    pub fn new(principal: Identity, raw_token: impl Into<String>) -> Self {
        Self {
            principal,
            raw_token: raw_token.into(),
        }
    }

    /// The principal's subject (login identifier).
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.principal.subject
    }

    /// Check if the principal holds an authority.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.principal.has_authority(authority)
    }

    /// Check if the principal holds any of the given authorities.
    #[must_use]
    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        self.principal.has_any_authority(authorities)
    }
}
