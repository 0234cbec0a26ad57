//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export BASE_URL="https://s.example.com"
//! export DEFAULT_VALIDITY_MINUTES="30"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Public prefix of generated short URLs (default: `http://localhost:8080`)
//! - `DEFAULT_VALIDITY_MINUTES` - Link lifetime when a request sets none (default: 30)
//! - `CODE_LENGTH` - Length of generated short codes (default: 6, range: 4-32)
//! - `SWEEP_INTERVAL_SECONDS` - Pause between expiry sweeps (default: 60)
//! - `READ_TIMEOUT_SECONDS` - Deadline for receiving a request body (default: 5)
//! - `WRITE_TIMEOUT_SECONDS` - Deadline for handling a request (default: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Values that fail to parse fall back to their defaults.

use anyhow::Result;
use chrono::TimeDelta;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::routes::Timeouts;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public prefix used to build `short_url` in responses.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub code_length: usize,
    pub sweep_interval_seconds: u64,
    pub read_timeout_seconds: u64,
    pub write_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: 30,
            code_length: 6,
            sweep_interval_seconds: 60,
            read_timeout_seconds: 5,
            write_timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            default_validity_minutes: parse_or(
                "DEFAULT_VALIDITY_MINUTES",
                defaults.default_validity_minutes,
            ),
            code_length: parse_or("CODE_LENGTH", defaults.code_length),
            sweep_interval_seconds: parse_or(
                "SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            read_timeout_seconds: parse_or("READ_TIMEOUT_SECONDS", defaults.read_timeout_seconds),
            write_timeout_seconds: parse_or(
                "WRITE_TIMEOUT_SECONDS",
                defaults.write_timeout_seconds,
            ),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an HTTP(S) URL
    /// - `log_format` is not `text` or `json`
    /// - `code_length` is outside 4-32
    /// - any duration is zero or the default validity is not positive
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be greater than 0, got {}",
                self.default_validity_minutes
            );
        }
        if TimeDelta::try_minutes(self.default_validity_minutes).is_none() {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES is too large, got {}",
                self.default_validity_minutes
            );
        }

        if !(4..=32).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 4 and 32, got {}",
                self.code_length
            );
        }

        if self.sweep_interval_seconds == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECONDS must be greater than 0");
        }
        if self.read_timeout_seconds == 0 {
            anyhow::bail!("READ_TIMEOUT_SECONDS must be greater than 0");
        }
        if self.write_timeout_seconds == 0 {
            anyhow::bail!("WRITE_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Lifetime of links created without an explicit validity.
    pub fn default_validity(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.default_validity_minutes).unwrap_or(TimeDelta::minutes(30))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            read: Duration::from_secs(self.read_timeout_seconds),
            write: Duration::from_secs(self.write_timeout_seconds),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Default validity: {} min", self.default_validity_minutes);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Sweep interval: {}s", self.sweep_interval_seconds);
        tracing::info!(
            "  Timeouts: read {}s, write {}s",
            self.read_timeout_seconds,
            self.write_timeout_seconds
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
