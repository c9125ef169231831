//! Rejection type for auth extractors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tessera_auth_core::ErrorKind;
use tessera_types::{ErrorCode, ErrorResponse};

/// Authentication and authorization rejections.
///
/// Renders the standard error body; this is the single place where an
/// unauthenticated request is turned into a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    /// No valid principal; carries the recorded reason, if any.
    #[error("authentication required: {0}")]
    Unauthenticated(ErrorKind),

    /// Authenticated, but lacking a required authority.
    #[error("access denied")]
    Forbidden,
}

impl AuthRejection {
    /// Catalogue entry for this rejection.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Unauthenticated(kind) => kind.error_code(),
            Self::Forbidden => ErrorCode::HandleAccessDenied,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status =
            StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::of(code))).into_response()
    }
}
