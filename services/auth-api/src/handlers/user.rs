//! User handlers (login, signup, myInfo, info)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tessera_axum::RequireAuthority;
use tessera_types::{Authority, LoginRequest, SignupRequest, UserResponse};

use crate::error::{ApiError, ApiResult};
use crate::handlers::token::token_response;
use crate::state::AppState;

/// POST /user/login
///
/// Check credentials and issue an access and refresh token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    req.validate().map_err(ApiError::Validation)?;

    let pair = state.auth.login(&req).await?;
    tracing::info!(email = %req.email, "User logged in");

    token_response(pair)
}

/// POST /user/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = payload?;
    req.validate().map_err(ApiError::Validation)?;

    Ok(Json(state.auth.signup(&req).await?))
}

/// GET /user/myInfo
///
/// Profile of the authenticated principal, resolved through the user store
pub async fn my_info(
    State(state): State<AppState>,
    auth: RequireAuthority,
) -> ApiResult<Json<UserResponse>> {
    auth.require_any(&[Authority::User.as_str(), Authority::Admin.as_str()])?;
    Ok(Json(state.auth.current_user(&auth.principal).await?))
}

/// GET /user/info/{username}
///
/// Admin-only lookup of any user by email
pub async fn user_info(
    State(state): State<AppState>,
    auth: RequireAuthority,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    auth.require_any(&[Authority::Admin.as_str()])?;
    Ok(Json(state.auth.user(&username).await?))
}
