//! Tessera Auth API
//!
//! Authentication microservice providing REST endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use auth_api::build_router;
use auth_api::config::Config;
use auth_api::state::AppState;
use auth_api::store::InMemoryUserStore;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tessera_auth_core::AuthService;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("auth_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tessera Auth API");

    // Load configuration; a bad signing secret aborts here
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        access_ttl_secs = config.token.access_token_validity.as_secs(),
        refresh_ttl_secs = config.token.refresh_token_validity.as_secs(),
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create user store
    let store = InMemoryUserStore::new();
    if let Some(admin) = &config.admin {
        store.seed_admin(&admin.email, &admin.password).await?;
    }

    // Create auth service
    let auth = AuthService::new(&config.token, Arc::new(store))?;

    // Create application state
    let state = AppState::new(auth, config.clone());

    // Build HTTP router
    let app = build_router(state, metrics_handle);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    run_http_server(app, addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_http_server(app: axum::Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!(
        "auth_token_validations_total",
        "Bearer tokens inspected by the authentication layer, by result"
    );
    metrics::describe_counter!("auth_tokens_issued_total", "Tokens issued, by kind");
    metrics::describe_counter!("auth_refresh_total", "Refresh exchanges, by result");

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
