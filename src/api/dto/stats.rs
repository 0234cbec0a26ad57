//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Link;

/// Full link record as reported by `GET /api/stats/{code}`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub long_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: u64,
}

impl From<Link> for StatsResponse {
    fn from(link: Link) -> Self {
        Self {
            long_url: link.long_url,
            short_code: link.short_code,
            created_at: link.created_at,
            expires_at: link.expires_at,
            clicks: link.clicks,
        }
    }
}
