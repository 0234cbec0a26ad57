//! Domain layer: the link entity, the in-memory registry that owns it, and
//! the background sweeper that evicts expired entries.
//!
//! - [`link`] - The [`link::Link`] record
//! - [`registry`] - [`registry::LinkRegistry`], the single owner of all links
//! - [`sweeper`] - [`sweeper::run_expiry_sweeper`], periodic expiry eviction
//!
//! The domain layer has no dependency on the HTTP layer; handlers in
//! [`crate::api`] translate requests into registry calls.

pub mod link;
pub mod registry;
pub mod sweeper;

pub use link::Link;
pub use registry::{LinkRegistry, RegistryError};
