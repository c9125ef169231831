//! Token issuance

use std::time::Duration;

use chrono::Utc;
use tessera_types::{Identity, TokenKind, TokenResponse};

use crate::config::TokenConfig;
use crate::token::{TokenClaims, TokenCodec};
use crate::AuthError;

/// Builds claim sets for access and refresh tokens and signs them
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    access_token_validity: Duration,
    refresh_token_validity: Duration,
}

impl TokenIssuer {
    /// Create an issuer using the validity durations from `config`
    pub fn new(codec: TokenCodec, config: &TokenConfig) -> Self {
        Self {
            codec,
            access_token_validity: config.access_token_validity,
            refresh_token_validity: config.refresh_token_validity,
        }
    }

    /// Validity duration for a token kind
    pub fn validity(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_validity,
            TokenKind::Refresh => self.refresh_token_validity,
        }
    }

    /// Issue a token of the given kind for an identity
    pub fn issue(&self, identity: &Identity, kind: TokenKind) -> Result<String, AuthError> {
        let ttl = i64::try_from(self.validity(kind).as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims::for_identity(identity, kind, Utc::now().timestamp(), ttl);
        let token = self.codec.encode(&claims)?;

        metrics::counter!("auth_tokens_issued_total", "kind" => kind.as_str()).increment(1);
        tracing::debug!(subject = %identity.subject, kind = %kind, "Issued token");

        Ok(token)
    }

    /// Issue an access token carrying the identity's authorities
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue(identity, TokenKind::Access)
    }

    /// Issue a refresh token (no authorities)
    pub fn issue_refresh_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue(identity, TokenKind::Refresh)
    }

    /// Issue both tokens; either both are returned or neither
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenResponse, AuthError> {
        Ok(TokenResponse {
            access_token: self.issue_access_token(identity)?,
            refresh_token: self.issue_refresh_token(identity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SigningKey;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn issuer() -> (TokenIssuer, TokenCodec) {
        let config = TokenConfig::new(STANDARD.encode([3u8; 64]))
            .with_access_token_validity(Duration::from_secs(600))
            .with_refresh_token_validity(Duration::from_secs(86_400));
        let codec = TokenCodec::new(SigningKey::from_bytes(&[3u8; 64]).unwrap());
        (TokenIssuer::new(codec.clone(), &config), codec)
    }

    #[test]
    fn test_issue_access_token() {
        let (issuer, codec) = issuer();
        let identity = Identity::new("a@b.com", ["ROLE_USER"]);

        let token = issuer.issue_access_token(&identity).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.subject, "a@b.com");
        assert_eq!(claims.authorities.as_deref(), Some("ROLE_USER"));
        assert_eq!(claims.expires_at - claims.issued_at, 600);
    }

    #[test]
    fn test_issue_refresh_token() {
        let (issuer, codec) = issuer();
        let identity = Identity::new("a@b.com", ["ROLE_USER", "ROLE_ADMIN"]);

        let token = issuer.issue_refresh_token(&identity).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.subject, "a@b.com");
        assert!(claims.authorities.is_none());
        assert_eq!(claims.expires_at - claims.issued_at, 86_400);
    }

    #[test]
    fn test_same_instant_tokens_decode_equal() {
        let (issuer, codec) = issuer();
        let identity = Identity::new("a@b.com", ["ROLE_USER"]);

        let first = codec.decode(&issuer.issue_access_token(&identity).unwrap()).unwrap();
        let second = codec.decode(&issuer.issue_access_token(&identity).unwrap()).unwrap();

        assert_eq!(first.subject, second.subject);
        assert_eq!(first.authorities, second.authorities);
    }

    #[test]
    fn test_issue_pair() {
        let (issuer, codec) = issuer();
        let identity = Identity::new("a@b.com", ["ROLE_USER"]);

        let pair = issuer.issue_pair(&identity).unwrap();
        assert_eq!(
            codec.decode(&pair.access_token).unwrap().kind(),
            TokenKind::Access
        );
        assert_eq!(
            codec.decode(&pair.refresh_token).unwrap().kind(),
            TokenKind::Refresh
        );
    }
}
