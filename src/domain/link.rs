//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its lifetime and click counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub long_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: u64,
}

impl Link {
    /// Creates a new Link with a zero click counter.
    pub fn new(
        long_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            long_url,
            short_code,
            created_at,
            expires_at,
            clicks: 0,
        }
    }

    /// Returns true if the link has reached its expiry time at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
