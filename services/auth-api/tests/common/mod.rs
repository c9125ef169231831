//! Shared harness for HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use auth_api::build_router;
use auth_api::config::Config;
use auth_api::state::AppState;
use auth_api::store::InMemoryUserStore;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use tessera_auth_core::AuthService;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@tessera.dev";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Base64 signing secret shared by every test app
pub fn secret() -> String {
    STANDARD.encode([42u8; 64])
}

pub fn config() -> Config {
    let secret = secret();
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(secret.clone()),
        "METRICS_ENABLED" => Some("false".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Router and the store behind it, with an administrator seeded
pub async fn app() -> (Router, InMemoryUserStore) {
    app_with_metrics(None).await
}

pub async fn app_with_metrics(
    metrics_handle: Option<PrometheusHandle>,
) -> (Router, InMemoryUserStore) {
    let config = config();
    let store = InMemoryUserStore::new();
    store.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let auth = AuthService::new(&config.token, Arc::new(store.clone())).unwrap();
    let router = build_router(AppState::new(auth, config), metrics_handle);
    (router, store)
}

/// Raw response pieces
pub struct TestResponse {
    pub status: StatusCode,
    pub authorization: Option<String>,
    pub refresh: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header_text = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let authorization = header_text(header::AUTHORIZATION.as_str());
    let refresh = header_text("refresh");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        authorization,
        refresh,
        body,
    }
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}
