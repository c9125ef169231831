//! Tower middleware layer for bearer-token authentication.
//!
//! The [`AuthLayer`] inspects the `Authorization` header of every request
//! whose path is not allow-listed and records an [`AuthenticationOutcome`] in
//! the request extensions. It never rejects a request itself; rejection is
//! left to the extractors.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{header, HeaderMap, Request};
use tessera_auth_core::{ErrorKind, TokenValidator};
use tessera_types::strip_bearer;
use tower::{Layer, Service};

use crate::context::{AuthContext, AuthenticationOutcome};

/// Paths that are never authenticated by default.
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/user/login",
    "/user/signup",
    "/token/refresh",
    "/health",
    "/ready",
    "/metrics",
];

/// Path prefixes that are never authenticated by default.
pub const DEFAULT_PUBLIC_PREFIXES: &[&str] = &["/docs", "/swagger-ui", "/api-docs"];

/// Configuration for the authentication layer.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Exact paths that skip token inspection.
    pub public_paths: BTreeSet<String>,
    /// Path prefixes that skip token inspection.
    pub public_prefixes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
            public_prefixes: DEFAULT_PUBLIC_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl AuthConfig {
    /// Create a config with the default allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with an empty allow-list.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            public_paths: BTreeSet::new(),
            public_prefixes: Vec::new(),
        }
    }

    /// Allow an exact path.
    #[must_use]
    pub fn public_path(mut self, path: impl Into<String>) -> Self {
        self.public_paths.insert(path.into());
        self
    }

    /// Allow every path under a prefix.
    #[must_use]
    pub fn public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefixes.push(prefix.into());
        self
    }

    /// Whether a path skips token inspection.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(path)
            || self.public_prefixes.iter().any(|prefix| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
    }
}

/// Tower layer that authenticates requests.
#[derive(Clone)]
pub struct AuthLayer {
    validator: TokenValidator,
    config: Arc<AuthConfig>,
}

impl AuthLayer {
    /// Create a new layer with the default allow-list.
    #[must_use]
    pub fn new(validator: TokenValidator) -> Self {
        Self::with_config(validator, AuthConfig::default())
    }

    /// Create a new layer with custom configuration.
    #[must_use]
    pub fn with_config(validator: TokenValidator, config: AuthConfig) -> Self {
        Self {
            validator,
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = RequestAuthenticator<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestAuthenticator {
            inner,
            validator: self.validator.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

/// The per-request authentication service.
#[derive(Clone)]
pub struct RequestAuthenticator<S> {
    inner: S,
    validator: TokenValidator,
    config: Arc<AuthConfig>,
}

impl<S> RequestAuthenticator<S> {
    /// Inspect the bearer credential, if any.
    ///
    /// Returns `None` for anonymous requests: no header, a header without the
    /// bearer prefix, or an empty token.
    fn authenticate(&self, headers: &HeaderMap) -> Option<AuthenticationOutcome> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(strip_bearer)?;

        let outcome = match self.validator.validate(token) {
            Ok(claims) if claims.authorities.is_none() => {
                tracing::info!(
                    subject = %claims.subject,
                    "Refresh token presented as access token"
                );
                AuthenticationOutcome::Rejected(ErrorKind::UnsupportedToken)
            }
            Ok(claims) => {
                tracing::debug!(subject = %claims.subject, "Authenticated request");
                AuthenticationOutcome::Authenticated(AuthContext::new(claims.identity(), token))
            }
            Err(kind) => AuthenticationOutcome::Rejected(kind),
        };

        let result = match &outcome {
            AuthenticationOutcome::Authenticated(_) => "success",
            AuthenticationOutcome::Rejected(kind) => kind.code(),
        };
        metrics::counter!("auth_token_validations_total", "result" => result).increment(1);

        Some(outcome)
    }
}

impl<S, B> Service<Request<B>> for RequestAuthenticator<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if !self.config.is_public(req.uri().path()) {
            if let Some(outcome) = self.authenticate(req.headers()) {
                req.extensions_mut().insert(outcome);
            }
        }
        self.inner.call(req)
    }
}
