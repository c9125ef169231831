//! Prometheus exposition of the token counters
//!
//! The recorder is process-global, so it is installed once for this binary
//! and every assertion only checks that a series is present.

mod common;

use std::sync::OnceLock;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::json;
use tower::ServiceExt;

use common::{get, post_json, send};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn handle() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| PrometheusBuilder::new().install_recorder().unwrap())
        .clone()
}

async fn scrape(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_token_counters_are_exported() {
    let (app, _) = common::app_with_metrics(Some(handle())).await;

    let response = send(
        &app,
        post_json(
            "/user/signup",
            json!({ "email": "m@tessera.dev", "password": "password123", "nickname": "metric" }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let tokens = send(
        &app,
        post_json(
            "/user/login",
            json!({ "email": "m@tessera.dev", "password": "password123" }),
        ),
    )
    .await;
    let authorization = tokens.authorization.unwrap();
    let refresh = tokens.refresh.unwrap();

    // One accepted and one rejected bearer credential
    send(
        &app,
        get("/user/myInfo", &[("authorization", authorization.as_str())]),
    )
    .await;
    send(&app, get("/user/myInfo", &[("authorization", "Bearer a.b.c")])).await;

    // One successful and one failed exchange
    send(&app, get("/token/refresh", &[("refresh", refresh.as_str())])).await;
    send(&app, get("/token/refresh", &[])).await;

    let body = scrape(&app).await;
    for series in [
        r#"auth_tokens_issued_total{kind="access"}"#,
        r#"auth_tokens_issued_total{kind="refresh"}"#,
        r#"auth_token_validations_total{result="success"}"#,
        r#"auth_token_validations_total{result="A004"}"#,
        r#"auth_refresh_total{result="success"}"#,
        r#"auth_refresh_total{result="failure"}"#,
    ] {
        assert!(body.contains(series), "missing {series} in:\n{body}");
    }
}

#[tokio::test]
async fn test_metrics_route_absent_when_disabled() {
    let (app, _) = common::app().await;
    let response = send(&app, get("/metrics", &[])).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
