//! Token validation with failure classification

use crate::error::ErrorKind;
use crate::token::{DecodeError, TokenClaims, TokenCodec};

/// Validates tokens and classifies every failure into an [`ErrorKind`]
///
/// Raw decode errors never cross this boundary.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: TokenCodec,
}

impl TokenValidator {
    /// Create a validator over the given codec
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims, ErrorKind> {
        self.codec.decode(token).map_err(|e| {
            let kind = classify(&e);
            tracing::info!(code = kind.code(), reason = %e, "{}", kind.error_code().message());
            kind
        })
    }

    /// Validate a token and return only its subject
    pub fn extract_subject(&self, token: &str) -> Result<String, ErrorKind> {
        self.validate(token).map(|claims| claims.subject)
    }
}

/// Map a decode failure onto the public taxonomy
pub fn classify(err: &DecodeError) -> ErrorKind {
    match err {
        DecodeError::Malformed(_) => ErrorKind::IncorrectSignature,
        DecodeError::Expired => ErrorKind::ExpiredToken,
        DecodeError::Unsupported(_) => ErrorKind::UnsupportedToken,
        DecodeError::Unparseable => ErrorKind::InvalidToken,
        DecodeError::Other(_) => ErrorKind::UnknownToken,
    }
}
