//! API request/response envelopes

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Standard error body
///
/// Emitted by the unauthenticated entry point and by every business error.
/// `errors` is empty unless the failure came from field-level input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Stable error code (e.g. `A002`)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Field-level validation errors
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Build the body for a catalogue entry
    pub fn of(code: ErrorCode) -> Self {
        Self {
            status: code.status(),
            code: code.code().to_string(),
            message: code.message().to_string(),
            errors: Vec::new(),
        }
    }

    /// Build the body for a catalogue entry with field errors attached
    pub fn with_field_errors(code: ErrorCode, errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            ..Self::of(code)
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Why the value was rejected
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
}
