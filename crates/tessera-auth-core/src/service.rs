//! Auth service - ties together the user store, token issuance, validation
//! and the refresh exchange

use std::collections::BTreeSet;
use std::sync::Arc;

use tessera_types::{
    Authority, Identity, LoginRequest, SignupRequest, TokenResponse, UserResponse,
};

use crate::{
    config::TokenConfig,
    crypto::KeyError,
    error::ErrorKind,
    issuer::TokenIssuer,
    refresh::RefreshExchange,
    store::{NewUser, UserStore},
    token::{TokenClaims, TokenCodec},
    validator::TokenValidator,
    AuthError,
};

/// Authentication service
///
/// Provides a single entry point for:
/// - Credential login and signup
/// - Token validation
/// - Refresh-token exchange
/// - User lookups
pub struct AuthService<U: UserStore> {
    issuer: TokenIssuer,
    validator: TokenValidator,
    refresh: RefreshExchange<U>,
    store: Arc<U>,
}

impl<U: UserStore> AuthService<U> {
    /// Create a new auth service
    ///
    /// # Errors
    /// Fails if the configured secret does not yield a usable signing key.
    pub fn new(config: &TokenConfig, store: Arc<U>) -> Result<Self, KeyError> {
        let codec = TokenCodec::new(config.signing_key()?);
        let issuer = TokenIssuer::new(codec.clone(), config);
        let validator = TokenValidator::new(codec);

        if !config.refresh_outlives_access() {
            tracing::warn!(
                access_secs = config.access_token_validity.as_secs(),
                refresh_secs = config.refresh_token_validity.as_secs(),
                "Refresh tokens do not outlive access tokens"
            );
        }

        Ok(Self {
            refresh: RefreshExchange::new(validator.clone(), issuer.clone(), Arc::clone(&store)),
            issuer,
            validator,
            store,
        })
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Authenticate with email and password and issue a token pair
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthError> {
        let user = self
            .store
            .verify_password(&request.email, &request.password)
            .await?
            .ok_or_else(|| {
                tracing::info!(email = %request.email, "Login rejected");
                ErrorKind::InvalidAccount
            })?;

        self.issuer.issue_pair(&user.identity())
    }

    /// Register a new user with the default authority
    pub async fn signup(&self, request: &SignupRequest) -> Result<UserResponse, AuthError> {
        let user = self
            .store
            .create(NewUser {
                email: request.email.clone(),
                password: request.password.clone(),
                nickname: request.nickname.clone(),
                authorities: BTreeSet::from([Authority::User.as_str().to_string()]),
            })
            .await?;

        tracing::info!(email = %user.email, "User registered");
        Ok(user.into())
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Validate an access or refresh token
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, ErrorKind> {
        self.validator.validate(token)
    }

    /// Exchange a refresh credential for a new access token
    pub async fn refresh(&self, credential: Option<&str>) -> Result<TokenResponse, AuthError> {
        self.refresh.exchange(credential).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Profile of the authenticated principal
    pub async fn current_user(&self, identity: &Identity) -> Result<UserResponse, AuthError> {
        self.user(&identity.subject).await
    }

    /// Profile of any user by email
    pub async fn user(&self, email: &str) -> Result<UserResponse, AuthError> {
        self.store
            .find_by_email(email)
            .await?
            .map(Into::into)
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the token validator
    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    /// Get the token issuer
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Get the user store
    pub fn store(&self) -> &Arc<U> {
        &self.store
    }
}
