//! Axum extractors for authentication and authorization.
//!
//! These extractors read the [`AuthenticationOutcome`] recorded by the
//! [`AuthLayer`](crate::AuthLayer) and act as the centralized entry point
//! for unauthenticated access.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_axum::{AuthRejection, MaybeAuth, RequireAuth, RequireAuthority};
//! use tessera_types::Authority;
//!
//! // Requires authentication (401 with the recorded reason if missing)
//! async fn protected(auth: RequireAuth) -> String {
//!     format!("Hello, {}!", auth.subject())
//! }
//!
//! // Optional authentication
//! async fn maybe_auth(auth: MaybeAuth) -> String {
//!     match auth.0 {
//!         Some(ctx) => format!("Hello, {}!", ctx.subject()),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//!
//! // Requires an authority (403 if missing)
//! async fn admin_only(auth: RequireAuthority) -> Result<String, AuthRejection> {
//!     auth.require_any(&[Authority::Admin.as_str()])?;
//!     Ok("Admin panel".to_string())
//! }
//! ```

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tessera_auth_core::ErrorKind;

use crate::context::{AuthContext, AuthenticationOutcome};
use crate::error::AuthRejection;

/// Read the outcome recorded for this request.
///
/// A request with no recorded outcome was anonymous; it is reported as
/// [`ErrorKind::UnknownToken`].
fn authenticated(parts: &Parts) -> Result<AuthContext, AuthRejection> {
    match parts.extensions.get::<AuthenticationOutcome>() {
        Some(AuthenticationOutcome::Authenticated(ctx)) => Ok(ctx.clone()),
        Some(AuthenticationOutcome::Rejected(kind)) => Err(AuthRejection::Unauthenticated(*kind)),
        None => Err(AuthRejection::Unauthenticated(ErrorKind::UnknownToken)),
    }
}

/// Extractor that requires authentication.
///
/// Returns 401 with the recorded failure reason if no valid principal is
/// bound to the request.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated(parts).map(Self)
    }
}

/// Extractor for optional authentication.
///
/// Returns `None` if no principal is bound, rather than failing.
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

impl Deref for MaybeAuth {
    type Target = Option<AuthContext>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(authenticated(parts).ok()))
    }
}

/// Extractor for handlers gated on authorities.
///
/// Extraction itself only requires authentication; the handler states which
/// authorities it accepts with [`RequireAuthority::require_any`].
#[derive(Debug, Clone)]
pub struct RequireAuthority(pub AuthContext);

impl Deref for RequireAuthority {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl RequireAuthority {
    /// Check an authenticated context against the accepted authorities.
    pub fn new(context: AuthContext, accepted: &[&str]) -> Result<Self, AuthRejection> {
        let this = Self(context);
        this.require_any(accepted)?;
        Ok(this)
    }

    /// Fail with 403 unless the principal holds one of `accepted`.
    pub fn require_any(&self, accepted: &[&str]) -> Result<(), AuthRejection> {
        if self.0.has_any_authority(accepted) {
            Ok(())
        } else {
            tracing::info!(subject = %self.0.subject(), ?accepted, "Access denied");
            Err(AuthRejection::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuthority
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated(parts).map(Self)
    }
}
