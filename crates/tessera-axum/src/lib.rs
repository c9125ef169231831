//! Tessera Axum Integration
//!
//! Axum middleware and extractors for bearer-token authentication.
//!
//! # Overview
//!
//! - **Middleware**: [`AuthLayer`] validates the `Authorization: Bearer` header
//!   of every non-allow-listed request and records the outcome
//! - **Extractors**: [`RequireAuth`], [`MaybeAuth`], [`RequireAuthority`]
//! - **Rejection**: [`AuthRejection`] renders the standard error body
//!
//! # Quick Start
//!
//! ```ignore
//! use tessera_axum::{AuthLayer, RequireAuth};
//! use axum::{Router, routing::get};
//!
//! async fn protected_handler(auth: RequireAuth) -> String {
//!     format!("Hello, {}!", auth.subject())
//! }
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(AuthLayer::new(validator));
//! ```

pub mod context;
pub mod error;
pub mod extractors;
pub mod layer;

// Re-export primary types
pub use context::{AuthContext, AuthenticationOutcome};
pub use error::AuthRejection;
pub use extractors::{MaybeAuth, RequireAuth, RequireAuthority};
pub use layer::{AuthConfig, AuthLayer, RequestAuthenticator};
