//! Short code generation and validation utilities.
//!
//! Generated codes are sampled from the 62-symbol alphanumeric alphabet.
//! The generator is not cryptographically secure; uniqueness is enforced by
//! the registry, which redraws on collision.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated codes when no length is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Maximum length accepted for custom codes.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Reserved codes that cannot be used as short links.
///
/// These match top-level route segments and would never be reachable as
/// redirects.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Generates a random short code of `len` characters.
///
/// Each character is drawn independently and uniformly from `a-z`, `A-Z`
/// and `0-9`, so the collision probability of two draws is `1 / 62^len`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route segment
///
/// Returns a short description of the violated rule on failure.
pub fn validate_custom_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err("custom code must be 1-64 characters");
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("custom code can only contain letters, digits, hyphens and underscores");
    }

    if RESERVED_CODES.contains(&code) {
        return Err("custom code is reserved");
    }

    Ok(())
}
