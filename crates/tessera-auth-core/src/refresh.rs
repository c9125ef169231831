//! Refresh-token exchange
//!
//! A valid refresh token is traded for a new access token. Authorities are
//! re-resolved from the user store, so role changes take effect on the next
//! exchange. The refresh token itself is returned unchanged.

use std::sync::Arc;

use tessera_types::{strip_bearer, TokenKind, TokenResponse, BEARER_PREFIX};

use crate::error::ErrorKind;
use crate::issuer::TokenIssuer;
use crate::store::UserStore;
use crate::validator::TokenValidator;
use crate::AuthError;

/// Exchanges refresh tokens for access tokens
pub struct RefreshExchange<U: UserStore> {
    validator: TokenValidator,
    issuer: TokenIssuer,
    store: Arc<U>,
}

impl<U: UserStore> RefreshExchange<U> {
    /// Create a new exchange
    pub fn new(validator: TokenValidator, issuer: TokenIssuer, store: Arc<U>) -> Self {
        Self {
            validator,
            issuer,
            store,
        }
    }

    /// Exchange the raw `Refresh` header value for a new token pair
    ///
    /// The `Bearer ` prefix is optional. Any credential problem is reported
    /// as [`ErrorKind::InvalidToken`]; the underlying cause is only logged.
    pub async fn exchange(&self, credential: Option<&str>) -> Result<TokenResponse, AuthError> {
        let result = self.try_exchange(credential).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(_) => "failure",
        };
        metrics::counter!("auth_refresh_total", "result" => outcome).increment(1);

        result
    }

    async fn try_exchange(&self, credential: Option<&str>) -> Result<TokenResponse, AuthError> {
        let token = credential
            .and_then(refresh_token_value)
            .ok_or_else(|| {
                tracing::info!("Refresh credential missing");
                ErrorKind::InvalidToken
            })?;

        let claims = self.validator.validate(token).map_err(|kind| {
            tracing::info!(cause = kind.code(), "Refresh token rejected");
            ErrorKind::InvalidToken
        })?;

        if claims.kind() != TokenKind::Refresh {
            tracing::info!(subject = %claims.subject, "Access token presented for refresh");
            return Err(ErrorKind::InvalidToken.into());
        }

        let user = self
            .store
            .find_by_email(&claims.subject)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(claims.subject.clone()))?;

        let access_token = self.issuer.issue_access_token(&user.identity())?;
        tracing::debug!(subject = %claims.subject, "Refreshed access token");

        Ok(TokenResponse {
            access_token,
            refresh_token: token.to_string(),
        })
    }
}

/// Token part of a `Refresh` header value, with or without the bearer prefix
fn refresh_token_value(value: &str) -> Option<&str> {
    if value.starts_with(BEARER_PREFIX) {
        return strip_bearer(value);
    }
    let token = value.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_value() {
        assert_eq!(refresh_token_value("Bearer abc"), Some("abc"));
        assert_eq!(refresh_token_value("abc"), Some("abc"));
        assert_eq!(refresh_token_value("Bearer "), None);
        assert_eq!(refresh_token_value("  "), None);
        assert_eq!(refresh_token_value(""), None);
    }
}
