//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full record of a short link, including its click count.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Expired links remain visible here until the sweeper evicts them.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state
        .registry
        .get(&code)
        .ok_or_else(|| AppError::not_found("short link not found"))?;

    Ok(Json(link.into()))
}
