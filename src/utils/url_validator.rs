//! Long URL validation.
//!
//! Links are stored exactly as submitted; this module only decides whether a
//! submitted destination is acceptable as a redirect target.

use url::Url;

/// Schemes that execute or embed content in the browser instead of
/// navigating. They are the only absolute URIs refused as destinations.
const BLOCKED_SCHEMES: &[&str] = &["javascript", "data"];

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("invalid url format: {0}")]
    InvalidFormat(String),

    #[error("scheme '{0}' is not allowed")]
    BlockedScheme(String),
}

/// Checks that `input` is a parseable absolute URI.
///
/// Any scheme is accepted (`ftp:`, `mailto:`, `urn:` ...) except the ones in
/// [`BLOCKED_SCHEMES`]. Relative references such as `not-a-url` or `/path`
/// have no scheme and fail to parse.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::BlockedScheme`] for `javascript:` and `data:`.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if BLOCKED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::BlockedScheme(url.scheme().to_string()));
    }

    Ok(url)
}
