//! Tessera Auth Core - Token lifecycle
//!
//! Signing key management, token encoding and decoding, validation with a
//! fixed failure taxonomy, and the refresh-token exchange.

pub mod config;
pub mod crypto;
pub mod error;
pub mod issuer;
pub mod refresh;
pub mod service;
pub mod store;
pub mod token;
pub mod validator;

pub use config::*;
pub use crypto::*;
pub use error::*;
pub use issuer::*;
pub use refresh::*;
pub use service::*;
pub use store::*;
pub use token::*;
pub use validator::*;
