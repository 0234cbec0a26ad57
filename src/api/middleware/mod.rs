//! HTTP middleware for request processing.
//!
//! - [`access_log`] - One structured log line per request
//! - [`timeout`] - Request body read and whole-request deadlines

pub mod access_log;
pub mod timeout;
