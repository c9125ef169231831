//! Tessera Types - Shared domain types
//!
//! This crate contains types used across tessera crates and services:
//! - Error catalogue and the standard error body
//! - Identity and token kinds
//! - User request/response bodies and their input validation

pub mod api;
pub mod auth;
pub mod error;
pub mod user;

pub use api::*;
pub use auth::*;
pub use error::*;
pub use user::*;
