//! User types

use serde::{Deserialize, Serialize};

use crate::api::FieldError;

/// Email length bounds (inclusive)
pub const EMAIL_LEN: (usize, usize) = (3, 100);
/// Password length bounds (inclusive)
pub const PASSWORD_LEN: (usize, usize) = (3, 100);
/// Nickname length bounds (inclusive)
pub const NICKNAME_LEN: (usize, usize) = (3, 50);

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login identifier
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl LoginRequest {
    /// Validate request fields
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_len("password", &self.password, PASSWORD_LEN, &mut errors);
        finish(errors)
    }
}

/// Signup request
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Login identifier
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub nickname: String,
}

impl SignupRequest {
    /// Validate request fields
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_len("password", &self.password, PASSWORD_LEN, &mut errors);
        check_len("nickname", &self.nickname, NICKNAME_LEN, &mut errors);
        finish(errors)
    }
}

/// Public view of a user (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Login identifier
    pub email: String,
    /// Display name
    pub nickname: String,
    /// Role names
    pub authorities: Vec<String>,
}

fn check_len(field: &str, value: &str, (min, max): (usize, usize), errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError::new(
            field,
            format!("size must be between {min} and {max}"),
        ));
    }
}

fn check_email(value: &str, errors: &mut Vec<FieldError>) {
    let before = errors.len();
    check_len("email", value, EMAIL_LEN, errors);
    if errors.len() == before && !is_email(value) {
        errors.push(FieldError::new("email", "must be a well-formed email address"));
    }
}

/// Loose email shape check: `local@domain` with a dotted, non-empty domain
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split('.')
            .all(|label| !label.is_empty())
        && domain.contains('.')
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
