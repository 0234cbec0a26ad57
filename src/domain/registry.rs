//! In-memory link registry.
//!
//! The registry is the single owner of every [`Link`]. All state lives in one
//! `HashMap` behind one reader/writer lock: lookups share the lock, every
//! mutation (create, click counting, sweeping) takes it exclusively. No
//! operation awaits or performs I/O while holding the lock.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use tracing::info;

use crate::domain::link::Link;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Number of random draws attempted before giving up on a generated code.
pub const MAX_GENERATION_ATTEMPTS: usize = 64;

/// Errors returned by registry mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid custom code: {0}")]
    InvalidCode(&'static str),

    #[error("custom code already exists")]
    CodeConflict(String),

    #[error("validity must be a positive duration")]
    InvalidValidity,

    #[error("could not generate a unique code after {attempts} attempts")]
    ExhaustedKeyspace { attempts: usize },
}

/// Thread-safe store of short links keyed by short code.
///
/// Share it between handlers and the expiry sweeper through an `Arc`.
#[derive(Debug)]
pub struct LinkRegistry {
    links: RwLock<HashMap<String, Link>>,
    code_length: usize,
}

impl LinkRegistry {
    /// Creates an empty registry generating codes of `code_length` characters.
    pub fn new(code_length: usize) -> Self {
        Self {
            links: RwLock::new(HashMap::new()),
            code_length,
        }
    }

    /// Creates a new link.
    ///
    /// With a non-empty `custom_code` the code is validated and must not be
    /// present yet, even as an expired entry the sweeper has not evicted.
    /// Otherwise random codes are drawn until an unused one is found, up to
    /// [`MAX_GENERATION_ATTEMPTS`] draws.
    ///
    /// The existence check and the insert run under a single write lock.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidUrl`] if `long_url` is not an absolute URI, or uses a blocked scheme
    /// - [`RegistryError::InvalidValidity`] if `validity` is not positive or overflows
    /// - [`RegistryError::InvalidCode`] if the custom code breaks the code rules
    /// - [`RegistryError::CodeConflict`] if the custom code is taken
    /// - [`RegistryError::ExhaustedKeyspace`] if no free code was drawn
    pub fn create(
        &self,
        long_url: &str,
        custom_code: Option<&str>,
        validity: TimeDelta,
    ) -> Result<Link, RegistryError> {
        validate_url(long_url).map_err(|e| RegistryError::InvalidUrl(e.to_string()))?;

        if validity <= TimeDelta::zero() {
            return Err(RegistryError::InvalidValidity);
        }

        let custom_code = custom_code.filter(|code| !code.is_empty());
        if let Some(code) = custom_code {
            validate_custom_code(code).map_err(RegistryError::InvalidCode)?;
        }

        let mut links = self.links.write();

        let code = match custom_code {
            Some(code) => {
                if links.contains_key(code) {
                    return Err(RegistryError::CodeConflict(code.to_string()));
                }
                code.to_string()
            }
            None => self.unused_code(&links)?,
        };

        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(validity)
            .ok_or(RegistryError::InvalidValidity)?;

        let link = Link::new(long_url.to_string(), code.clone(), created_at, expires_at);
        links.insert(code, link.clone());

        info!(
            short_code = %link.short_code,
            long_url = %link.long_url,
            expires_at = %link.expires_at,
            "link created"
        );

        Ok(link)
    }

    /// Returns a copy of the link stored under `code`, expired or not.
    pub fn get(&self, code: &str) -> Option<Link> {
        self.links.read().get(code).cloned()
    }

    /// Adds one click to the link stored under `code`.
    ///
    /// Unknown codes are ignored. Returns whether a link was updated.
    pub fn increment(&self, code: &str) -> bool {
        match self.links.write().get_mut(code) {
            Some(link) => {
                link.clicks += 1;
                true
            }
            None => false,
        }
    }

    /// Removes every link expired at the current instant.
    ///
    /// Returns the evicted codes.
    pub fn sweep_expired(&self) -> Vec<String> {
        self.sweep_expired_at(Utc::now())
    }

    /// Removes every link with `expires_at <= now`, leaving the rest untouched.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut links = self.links.write();
        let mut removed = Vec::new();

        links.retain(|code, link| {
            if link.is_expired_at(now) {
                removed.push(code.clone());
                false
            } else {
                true
            }
        });

        removed
    }

    /// Number of links currently held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    /// Drops every link.
    pub fn clear(&self) {
        self.links.write().clear();
    }

    fn unused_code(&self, links: &HashMap<String, Link>) -> Result<String, RegistryError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code(self.code_length);
            if !links.contains_key(&code) {
                return Ok(code);
            }
        }

        Err(RegistryError::ExhaustedKeyspace {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

impl Default for LinkRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn thirty_minutes() -> TimeDelta {
        TimeDelta::minutes(30)
    }

    #[test]
    fn test_create_then_get() {
        let registry = LinkRegistry::default();

        let link = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap();
        let stored = registry.get(&link.short_code).unwrap();

        assert_eq!(stored.long_url, "https://example.com");
        assert_eq!(stored.clicks, 0);
        assert_eq!(stored, link);
    }

    #[test]
    fn test_create_sets_expiry_from_validity() {
        let registry = LinkRegistry::default();

        let link = registry
            .create("https://example.com", None, TimeDelta::minutes(5))
            .unwrap();

        assert_eq!(link.expires_at - link.created_at, TimeDelta::minutes(5));
        assert!(link.expires_at > link.created_at);
    }

    #[test]
    fn test_generated_code_shape() {
        let registry = LinkRegistry::default();

        for _ in 0..50 {
            let link = registry
                .create("https://example.com", None, thirty_minutes())
                .unwrap();
            assert_eq!(link.short_code.len(), 6);
            assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        }

        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_generated_code_respects_configured_length() {
        let registry = LinkRegistry::new(10);

        let link = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap();

        assert_eq!(link.short_code.len(), 10);
    }

    #[test]
    fn test_empty_custom_code_generates_one() {
        let registry = LinkRegistry::default();

        let link = registry
            .create("https://example.com", Some(""), thirty_minutes())
            .unwrap();

        assert_eq!(link.short_code.len(), 6);
    }

    #[test]
    fn test_custom_code_is_used() {
        let registry = LinkRegistry::default();

        let link = registry
            .create("https://example.com", Some("abc"), thirty_minutes())
            .unwrap();

        assert_eq!(link.short_code, "abc");
        assert!(registry.get("abc").is_some());
    }

    #[test]
    fn test_custom_code_conflict() {
        let registry = LinkRegistry::default();
        registry
            .create("https://first.com", Some("abc"), thirty_minutes())
            .unwrap();

        let err = registry
            .create("https://second.com", Some("abc"), TimeDelta::minutes(1))
            .unwrap_err();

        assert_eq!(err, RegistryError::CodeConflict("abc".to_string()));
        assert_eq!(registry.get("abc").unwrap().long_url, "https://first.com");
    }

    #[test]
    fn test_custom_code_conflicts_with_unswept_expired_link() {
        let registry = LinkRegistry::default();
        registry
            .create("https://first.com", Some("abc"), TimeDelta::milliseconds(1))
            .unwrap();
        thread::sleep(std::time::Duration::from_millis(5));

        let err = registry
            .create("https://second.com", Some("abc"), thirty_minutes())
            .unwrap_err();
        assert!(matches!(err, RegistryError::CodeConflict(_)));

        registry.sweep_expired();
        assert!(
            registry
                .create("https://second.com", Some("abc"), thirty_minutes())
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_custom_code() {
        let registry = LinkRegistry::default();

        let err = registry
            .create("https://example.com", Some("no/slashes"), thirty_minutes())
            .unwrap_err();

        assert!(matches!(err, RegistryError::InvalidCode(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_non_http_absolute_urls_are_accepted() {
        let registry = LinkRegistry::default();

        for input in ["ftp://example.com/file.txt", "mailto:a@b.com", "urn:isbn:0451450523"] {
            let link = registry.create(input, None, thirty_minutes()).unwrap();
            assert_eq!(link.long_url, input);
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_invalid_url() {
        let registry = LinkRegistry::default();

        for input in ["not-a-url", "", "/relative", "javascript:alert(1)", "data:,x"] {
            let err = registry
                .create(input, None, thirty_minutes())
                .unwrap_err();
            assert!(matches!(err, RegistryError::InvalidUrl(_)), "{input}");
        }

        assert!(registry.is_empty());
    }

    #[test]
    fn test_non_positive_validity() {
        let registry = LinkRegistry::default();

        for validity in [TimeDelta::zero(), TimeDelta::minutes(-5)] {
            let err = registry
                .create("https://example.com", None, validity)
                .unwrap_err();
            assert_eq!(err, RegistryError::InvalidValidity);
        }
    }

    #[test]
    fn test_overflowing_validity() {
        let registry = LinkRegistry::default();

        let err = registry
            .create("https://example.com", None, TimeDelta::MAX)
            .unwrap_err();

        assert_eq!(err, RegistryError::InvalidValidity);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_exhausted_keyspace() {
        let registry = LinkRegistry::new(1);
        let alphabet = ('a'..='z').chain('A'..='Z').chain('0'..='9');
        for c in alphabet {
            registry
                .create("https://example.com", Some(&c.to_string()), thirty_minutes())
                .unwrap();
        }
        assert_eq!(registry.len(), 62);

        let err = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::ExhaustedKeyspace {
                attempts: MAX_GENERATION_ATTEMPTS
            }
        );
    }

    #[test]
    fn test_get_unknown_code() {
        let registry = LinkRegistry::default();
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_increment() {
        let registry = LinkRegistry::default();
        let link = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap();

        assert!(registry.increment(&link.short_code));
        assert!(registry.increment(&link.short_code));

        assert_eq!(registry.get(&link.short_code).unwrap().clicks, 2);
    }

    #[test]
    fn test_increment_unknown_code_is_noop() {
        let registry = LinkRegistry::default();

        assert!(!registry.increment("missing"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let registry = Arc::new(LinkRegistry::default());
        let link = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let code = link.short_code.clone();
                thread::spawn(move || {
                    for _ in 0..125 {
                        registry.increment(&code);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.get(&link.short_code).unwrap().clicks, 1000);
    }

    #[test]
    fn test_concurrent_creates_never_share_a_code() {
        let registry = Arc::new(LinkRegistry::new(3));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..100)
                        .map(|j| {
                            registry
                                .create(
                                    &format!("https://example.com/{i}/{j}"),
                                    None,
                                    TimeDelta::minutes(30),
                                )
                                .unwrap()
                                .short_code
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut codes = HashSet::new();
        for handle in handles {
            codes.extend(handle.join().unwrap());
        }

        assert_eq!(codes.len(), 1600);
        assert_eq!(registry.len(), 1600);
    }

    #[test]
    fn test_sweep_removes_only_expired_links() {
        let registry = LinkRegistry::default();
        let short = registry
            .create("https://short.com", Some("short"), TimeDelta::minutes(1))
            .unwrap();
        let long = registry
            .create("https://long.com", Some("long"), TimeDelta::minutes(60))
            .unwrap();

        let removed = registry.sweep_expired_at(short.expires_at);

        assert_eq!(removed, vec!["short".to_string()]);
        assert!(registry.get("short").is_none());
        assert_eq!(registry.get("long").unwrap(), long);
    }

    #[test]
    fn test_sweep_keeps_live_links() {
        let registry = LinkRegistry::default();
        let link = registry
            .create("https://example.com", None, thirty_minutes())
            .unwrap();
        registry.increment(&link.short_code);

        assert!(registry.sweep_expired().is_empty());
        assert_eq!(registry.get(&link.short_code).unwrap().clicks, 1);
    }

    #[test]
    fn test_sweep_everything_past_all_expiries() {
        let registry = LinkRegistry::default();
        for i in 0..10 {
            registry
                .create(
                    &format!("https://example.com/{i}"),
                    None,
                    TimeDelta::minutes(i + 1),
                )
                .unwrap();
        }

        let removed = registry.sweep_expired_at(Utc::now() + TimeDelta::hours(1));

        assert_eq!(removed.len(), 10);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = LinkRegistry::default();
        registry
            .create("https://example.com", Some("abc"), thirty_minutes())
            .unwrap();

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.get("abc").is_none());
    }
}
