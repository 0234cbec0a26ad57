//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Liveness check
//! - `/api/*`            - JSON API (shorten, stats)
//!
//! # Middleware
//!
//! - **Access log** - One structured log line per request
//! - **Deadlines** - Request body read timeout and whole-request timeout

use std::time::Duration;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{access_log, timeout};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Request deadlines applied uniformly to every route.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub read: Duration,
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(5),
            write: Duration::from_secs(10),
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing-slash normalisation is applied by [`crate::server::run`] around
/// the returned router, since it has to run before routing.
pub fn app_router(state: AppState, timeouts: Timeouts) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(timeout::read_layer(timeouts.read))
        .layer(timeout::write_layer(timeouts.write))
        .layer(middleware::map_response(timeout::error_body))
        .layer(middleware::from_fn(access_log::layer))
}
