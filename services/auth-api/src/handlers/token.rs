//! Token handlers (refresh)

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;
use tessera_types::{bearer, TokenResponse, REFRESH_HEADER};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /token/refresh
///
/// Exchange the `Refresh` header for a new access token. The refresh token is
/// returned unchanged.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let credential = headers
        .get(REFRESH_HEADER)
        .and_then(|value| value.to_str().ok());

    let pair = state.auth.refresh(credential).await?;
    token_response(pair)
}

/// Token pair as both headers and body
pub(crate) fn token_response(pair: TokenResponse) -> ApiResult<impl IntoResponse> {
    let access = header_value(&pair.access_token)?;
    let refresh = header_value(&pair.refresh_token)?;

    Ok((
        [
            (header::AUTHORIZATION, access),
            (HeaderName::from_static("refresh"), refresh),
        ],
        Json(pair),
    ))
}

fn header_value(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&bearer(token)).map_err(|e| ApiError::Internal(e.to_string()))
}
