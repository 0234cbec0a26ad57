//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. Absent, `null` and `""` are all missing.
    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url is required")
    )]
    pub url: Option<String>,

    /// Optional custom short code. Empty means "generate one".
    #[validate(length(max = 64, message = "custom code must be 1-64 characters"))]
    pub custom_code: Option<String>,

    /// Optional lifetime in minutes. Absent or non-positive values fall back
    /// to the configured default.
    pub validity_minutes: Option<i64>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
    pub long_url: String,
}
