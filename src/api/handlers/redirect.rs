//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link
/// 2. Reject it if its expiry time has been reached
/// 3. Count the click
/// 4. Return 302 Found with the long URL in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired but has not been swept yet.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .registry
        .get(&code)
        .ok_or_else(|| AppError::not_found("short link not found"))?;

    if link.is_expired_at(Utc::now()) {
        return Err(AppError::gone("short link expired"));
    }

    state.registry.increment(&code);

    info!(short_code = %code, to = %link.long_url, "redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
