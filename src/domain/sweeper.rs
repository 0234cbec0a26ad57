//! Background task evicting expired links.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::registry::LinkRegistry;

/// Periodically evicts expired links from the registry.
///
/// Sleeps `interval`, sweeps, and repeats for as long as the task lives.
/// Spawn it once per registry; abort the task handle to stop it.
pub async fn run_expiry_sweeper(registry: Arc<LinkRegistry>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        let removed = registry.sweep_expired();
        if removed.is_empty() {
            continue;
        }

        for code in &removed {
            debug!(short_code = %code, "expired link removed");
        }
        info!(
            removed = removed.len(),
            remaining = registry.len(),
            "expired links swept"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_sweeper_evicts_expired_links() {
        let registry = Arc::new(LinkRegistry::default());
        registry
            .create("https://gone.com", Some("gone"), TimeDelta::milliseconds(1))
            .unwrap();
        registry
            .create("https://kept.com", Some("kept"), TimeDelta::minutes(30))
            .unwrap();

        let task = tokio::spawn(run_expiry_sweeper(
            Arc::clone(&registry),
            Duration::from_millis(20),
        ));
        tokio::time::sleep(Duration::from_millis(200)).await;
        task.abort();

        assert!(registry.get("gone").is_none());
        assert!(registry.get("kept").is_some());
    }

    #[tokio::test]
    async fn test_sweeper_waits_one_interval_before_first_sweep() {
        let registry = Arc::new(LinkRegistry::default());
        registry
            .create("https://gone.com", Some("gone"), TimeDelta::milliseconds(1))
            .unwrap();

        let task = tokio::spawn(run_expiry_sweeper(
            Arc::clone(&registry),
            Duration::from_secs(3600),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        task.abort();

        assert!(registry.get("gone").is_some());
    }
}
