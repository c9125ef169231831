//! Error types for the Auth API service.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tessera_auth_core::AuthError;
use tessera_axum::AuthRejection;
use tessera_types::{ErrorCode, ErrorResponse, FieldError};

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Invalid parameter type: {0}")]
    InvalidType(String),

    #[error("Unreadable request: {0}")]
    Unreadable(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Rejected(#[from] AuthRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidInputValue,
            Self::InvalidType(_) => ErrorCode::InvalidTypeValue,
            Self::Unreadable(_) => ErrorCode::MessageNotReadable,
            Self::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            Self::Auth(e) => e.error_code(),
            Self::Rejected(r) => r.error_code(),
            Self::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::InvalidType(e.body_text()),
            other => Self::Unreadable(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();

        // Log internal errors
        if code == ErrorCode::InternalServerError {
            tracing::error!(error = ?self, "Internal API error");
        } else {
            tracing::debug!(code = code.code(), error = %self, "Request failed");
        }

        let body = match self {
            Self::Validation(errors) => ErrorResponse::with_field_errors(code, errors),
            _ => ErrorResponse::of(code),
        };

        let status =
            StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
