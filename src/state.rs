//! Shared application state injected into every handler.

use std::sync::Arc;

use chrono::TimeDelta;

use crate::domain::LinkRegistry;

/// Handles shared by all request handlers.
///
/// Cloning is cheap: the registry is reference-counted and the remaining
/// fields are small.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry>,
    /// Public prefix used to build `short_url`, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Lifetime of links created without an explicit validity.
    pub default_validity: TimeDelta,
}

impl AppState {
    pub fn new(
        registry: Arc<LinkRegistry>,
        base_url: impl Into<String>,
        default_validity: TimeDelta,
    ) -> Self {
        Self {
            registry,
            base_url: base_url.into(),
            default_validity,
        }
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
