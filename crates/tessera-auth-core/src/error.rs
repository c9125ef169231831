//! Auth errors

use tessera_types::ErrorCode;
use thiserror::Error;

use crate::store::StoreError;

/// Classified authentication failure
///
/// Every token validation failure maps to exactly one of these kinds. Each
/// kind has a stable client-facing code, so the set must not change.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Signature does not verify against the active key, or the token is
    /// structurally broken
    #[error("invalid token signature")]
    IncorrectSignature,

    /// Signature valid, token past its expiry
    #[error("token expired")]
    ExpiredToken,

    /// Signature valid, claim set not recognized
    #[error("unsupported token")]
    UnsupportedToken,

    /// Missing, empty or unparseable input, or explicit protocol rejection
    #[error("invalid token")]
    InvalidToken,

    /// Any failure not otherwise classified
    #[error("unknown token error")]
    UnknownToken,

    /// Credential-based login did not match a known identity
    #[error("invalid account")]
    InvalidAccount,
}

impl ErrorKind {
    /// Catalogue entry for this kind
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::IncorrectSignature => ErrorCode::IncorrectSignature,
            Self::ExpiredToken => ErrorCode::ExpiredToken,
            Self::UnsupportedToken => ErrorCode::UnsupportedToken,
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::UnknownToken => ErrorCode::UnknownToken,
            Self::InvalidAccount => ErrorCode::InvalidAccount,
        }
    }

    /// Stable code string (e.g. `A002`)
    pub const fn code(self) -> &'static str {
        self.error_code().code()
    }

    /// HTTP status code for this kind
    pub const fn status_code(self) -> u16 {
        self.error_code().status()
    }
}

/// Authentication service errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Classified rejection
    #[error(transparent)]
    Rejected(#[from] ErrorKind),

    /// No user with this identifier
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Signup for an identifier that already exists
    #[error("email already in use: {0}")]
    EmailAlreadyUsed(String),

    /// User store failure
    #[error("user store error: {0}")]
    Store(String),

    /// Token could not be encoded
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl AuthError {
    /// Catalogue entry for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Rejected(kind) => kind.error_code(),
            Self::UserNotFound(_) => ErrorCode::UserNotFound,
            Self::EmailAlreadyUsed(_) => ErrorCode::EmailDuplication,
            Self::Store(_) | Self::Encoding(_) => ErrorCode::InternalServerError,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.error_code().status()
    }

    /// The classified kind, if this is a rejection
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(email) => Self::EmailAlreadyUsed(email),
            StoreError::NotFound(email) => Self::UserNotFound(email),
            StoreError::Backend(msg) => {
                tracing::error!("User store error: {}", msg);
                Self::Store(msg)
            }
        }
    }
}
