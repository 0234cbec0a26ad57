//! HTTP server initialization and runtime setup.
//!
//! Builds the link registry, spawns the expiry sweeper, and drives the Axum
//! server until Ctrl-C.

use crate::config::Config;
use crate::domain::LinkRegistry;
use crate::domain::sweeper::run_expiry_sweeper;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory link registry
/// - Background expiry sweeper
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let registry = Arc::new(LinkRegistry::new(config.code_length));

    tokio::spawn(run_expiry_sweeper(
        registry.clone(),
        config.sweep_interval(),
    ));
    tracing::info!(
        "Expiry sweeper started (every {}s)",
        config.sweep_interval_seconds
    );

    let state = AppState::new(registry, config.base_url.clone(), config.default_validity());

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state, config.timeouts()));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
