//! Request logging middleware.

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

/// Logs method, path, status, duration and client address of every request.
///
/// The client address comes from [`ConnectInfo`], which is only present when
/// the router is served with
/// `into_make_service_with_connect_info::<SocketAddr>()`; otherwise `-` is
/// logged.
///
/// # Example Logs
///
/// ```text
/// INFO incoming request method=POST path=/api/shorten status=201 duration_ms=0 client=127.0.0.1:51234
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .layer(axum::middleware::from_fn(access_log::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        client = %client,
        "incoming request"
    );

    response
}
