//! Error catalogue
//!
//! Every error the service reports to clients carries a stable code from this
//! catalogue. Clients match on `code`, never on `message`.

/// Catalogue of client-facing error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Common
    InvalidInputValue,
    InvalidTypeValue,
    MessageNotReadable,
    EntityNotFound,
    MethodNotAllowed,
    HandleAccessDenied,
    InternalServerError,

    // User
    EmailDuplication,
    UserNotFound,

    // Authentication
    InvalidToken,
    ExpiredToken,
    UnsupportedToken,
    IncorrectSignature,
    UnknownToken,

    // Login
    InvalidAccount,
}

impl ErrorCode {
    /// HTTP status code for this error
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidInputValue
            | Self::InvalidTypeValue
            | Self::MessageNotReadable
            | Self::EntityNotFound
            | Self::EmailDuplication
            | Self::UserNotFound
            | Self::InvalidAccount => 400,
            Self::MethodNotAllowed => 405,
            Self::HandleAccessDenied => 403,
            Self::InternalServerError => 500,
            Self::InvalidToken
            | Self::ExpiredToken
            | Self::UnsupportedToken
            | Self::IncorrectSignature
            | Self::UnknownToken => 401,
        }
    }

    /// Stable code string sent in the `code` field
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInputValue => "C001",
            Self::InvalidTypeValue => "C002",
            Self::MessageNotReadable => "C003",
            Self::EntityNotFound => "C004",
            Self::MethodNotAllowed => "C005",
            Self::HandleAccessDenied => "C006",
            Self::InternalServerError => "C007",
            Self::EmailDuplication => "U001",
            Self::UserNotFound => "U002",
            Self::InvalidToken => "A001",
            Self::ExpiredToken => "A002",
            Self::UnsupportedToken => "A003",
            Self::IncorrectSignature => "A004",
            Self::UnknownToken => "A005",
            Self::InvalidAccount => "L001",
        }
    }

    /// Default human-readable message
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInputValue => "Invalid parameter value",
            Self::InvalidTypeValue => "Invalid parameter type",
            Self::MessageNotReadable => "Unreadable request format",
            Self::EntityNotFound => "Result does not exist",
            Self::MethodNotAllowed => "Method not allowed",
            Self::HandleAccessDenied => "Access is denied",
            Self::InternalServerError => "Server Error",
            Self::EmailDuplication => "Email is already in use",
            Self::UserNotFound => "User does not exist",
            Self::InvalidToken => "Invalid JWT token",
            Self::ExpiredToken => "Expired JWT token",
            Self::UnsupportedToken => "Unsupported JWT token",
            Self::IncorrectSignature => "Invalid JWT signature",
            Self::UnknownToken => "Unknown error",
            Self::InvalidAccount => "Account information does not match",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
