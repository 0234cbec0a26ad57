//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use chrono::TimeDelta;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "custom_code": "promo",      // optional
///   "validity_minutes": 60       // optional, default from config
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "short_url": "http://localhost:8080/aZ3k9Q",
///   "short_code": "aZ3k9Q",
///   "expires_at": "2026-01-02T03:34:05Z",
///   "long_url": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: malformed JSON, missing `url`, invalid URL,
///   invalid or already taken custom code
/// - **503 Service Unavailable**: no free generated code could be found
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let validity = resolve_validity(payload.validity_minutes, state.default_validity)?;
    let url = payload.url.as_deref().unwrap_or_default();

    let link = state
        .registry
        .create(url, payload.custom_code.as_deref(), validity)?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.short_url(&link.short_code),
            short_code: link.short_code,
            expires_at: link.expires_at,
            long_url: link.long_url,
        }),
    ))
}

/// Picks the requested validity, falling back to `default` when the request
/// omits it or asks for a non-positive lifetime.
fn resolve_validity(minutes: Option<i64>, default: TimeDelta) -> Result<TimeDelta, AppError> {
    match minutes {
        Some(minutes) if minutes > 0 => TimeDelta::try_minutes(minutes)
            .ok_or_else(|| AppError::bad_request("validity_minutes is out of range")),
        _ => Ok(default),
    }
}
