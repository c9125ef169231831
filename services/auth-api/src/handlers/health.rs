//! Health check handlers
//!
//! The signing key and the user store are both in-process and set up before
//! the listener binds, so there is no dependency left for `/ready` to probe.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "auth-api",
    })
}

/// GET /ready - Readiness probe
pub async fn ready() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        service: "auth-api",
    })
}
