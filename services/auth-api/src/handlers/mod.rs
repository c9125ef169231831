//! HTTP handlers

mod health;
mod token;
mod user;

pub use health::{health, ready};
pub use token::refresh;
pub use user::{login, my_info, signup, user_info};

use crate::error::ApiError;

/// Fallback for a known path hit with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
