//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint and performs a single
//! registry call.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
