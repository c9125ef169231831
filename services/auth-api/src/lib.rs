//! Tessera Auth API
//!
//! Authentication service issuing and refreshing bearer tokens.
//!
//! ## REST Endpoints
//!
//! - `POST /user/login` - Check credentials, issue access and refresh tokens
//! - `POST /user/signup` - Register a user with `ROLE_USER`
//! - `GET /user/myInfo` - Profile of the authenticated user
//! - `GET /user/info/{username}` - Any user's profile (admin only)
//! - `GET /token/refresh` - Exchange the `Refresh` header for a new access token
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod store;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tessera_axum::AuthLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Build the HTTP router
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Authenticated routes; the allow-listed ones pass through untouched
    let api = Router::new()
        .route("/user/login", post(handlers::login))
        .route("/user/signup", post(handlers::signup))
        .route("/user/myInfo", get(handlers::my_info))
        .route("/user/info/{username}", get(handlers::user_info))
        .route("/token/refresh", get(handlers::refresh))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(AuthLayer::new(state.auth.validator().clone()));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS; both token headers must be readable by browser clients
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::HeaderName::from_static("refresh"),
                ]),
        )
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    // Combine all routes
    Router::new()
        .merge(api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}
