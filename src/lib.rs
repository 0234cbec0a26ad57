//! # TTL Shortener
//!
//! A small URL shortening service built with Axum. Links live in memory,
//! count their clicks, and expire after a configurable lifetime.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entity, the in-memory
//!   [`domain::LinkRegistry`] and the background expiry sweeper
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//! - **Utilities** ([`utils`]) - Code generation and URL validation
//!
//! ## Endpoints
//!
//! - `POST /api/shorten` - Create a short link
//! - `GET  /api/stats/{code}` - Link record with click count
//! - `GET  /{code}` - Redirect (302), 404 if unknown, 410 if expired
//! - `GET  /health` - Liveness check
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:8080"
//! cargo run
//! ```
//!
//! Nothing is persisted: all links are lost on restart.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::LinkRegistry;
    pub use crate::routes::{Timeouts, app_router};
    pub use crate::state::AppState;
}
