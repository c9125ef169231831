//! Token encoding and decoding
//!
//! Tokens are compact JWS strings signed with HS512. Access tokens carry the
//! subject's authorities in the `auth` claim; refresh tokens omit it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use tessera_types::{Identity, TokenKind};

use crate::crypto::SigningKey;
use crate::AuthError;

/// Issuer stamped into every token
pub const ISSUER: &str = "tessera";

/// Claim key carrying the comma-joined authorities
pub const AUTHORITIES_KEY: &str = "auth";

const ALGORITHM: Algorithm = Algorithm::HS512;

/// Claims carried by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Subject (login identifier)
    #[serde(rename = "sub")]
    pub subject: String,
    /// Comma-joined authorities; present only on access tokens
    #[serde(rename = "auth", default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<String>,
    /// Issued at (seconds since epoch)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl TokenClaims {
    /// Build the claim set for an identity
    pub fn for_identity(
        identity: &Identity,
        kind: TokenKind,
        issued_at: i64,
        ttl_secs: i64,
    ) -> Self {
        let authorities = match kind {
            TokenKind::Access => Some(identity.authorities_claim()),
            TokenKind::Refresh => None,
        };
        Self {
            issuer: ISSUER.to_string(),
            subject: identity.subject.clone(),
            authorities,
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
        }
    }

    /// Token kind, derived from the claim shape
    pub fn kind(&self) -> TokenKind {
        if self.authorities.is_some() {
            TokenKind::Access
        } else {
            TokenKind::Refresh
        }
    }

    /// Identity carried by the claims (no authorities for refresh tokens)
    pub fn identity(&self) -> Identity {
        Identity::from_claim(&self.subject, self.authorities.as_deref().unwrap_or_default())
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.expires_at
    }
}

/// Decode failure, before classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Not decodable as a token at all (empty or blank input)
    #[error("token is empty")]
    Unparseable,

    /// Structurally invalid, wrong algorithm, or signature mismatch
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature valid, token past its expiry
    #[error("token expired")]
    Expired,

    /// Signature valid, claim shape or header not recognized
    #[error("unsupported token: {0}")]
    Unsupported(String),

    /// Anything else
    #[error("token decode failed: {0}")]
    Other(String),
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::InvalidToken
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Utf8(_) => Self::Malformed(err.to_string()),
            JwtErrorKind::Json(_)
            | JwtErrorKind::MissingRequiredClaim(_)
            | JwtErrorKind::InvalidIssuer
            | JwtErrorKind::ImmatureSignature => Self::Unsupported(err.to_string()),
            _ => Self::Other(err.to_string()),
        }
    }
}

/// Encodes claim sets into signed tokens and decodes them back
#[derive(Clone)]
pub struct TokenCodec {
    key: SigningKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec over the given key
    pub fn new(key: SigningKey) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self { key, validation }
    }

    /// Sign a claim set
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let mut header = Header::new(ALGORITHM);
        header.typ = Some("JWT".to_string());

        encode(&header, claims, self.key.encoding_key()).map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            AuthError::Encoding(e.to_string())
        })
    }

    /// Verify a token's signature and expiry and parse its claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, DecodeError> {
        if token.trim().is_empty() {
            return Err(DecodeError::Unparseable);
        }

        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(DecodeError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }

        // The header must at least be a JSON object before it is worth
        // distinguishing an unknown algorithm from garbage.
        let header_json = URL_SAFE_NO_PAD
            .decode(segments[0])
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&header_json)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let header = decode_header(token).map_err(|e| DecodeError::Unsupported(e.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(DecodeError::Malformed(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }

        let data = decode::<TokenClaims>(token, self.key.decoding_key(), &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
