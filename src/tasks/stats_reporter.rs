//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::TransparentCache;

/// Spawns a background task that logs cache statistics as JSON.
///
/// The task runs until aborted, sleeping for the specified interval
/// between reports. It only takes a read lock on the store.
///
/// # Arguments
/// * `cache` - Handle to the cache to report on
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = TransparentCache::new(service, Duration::from_secs(60));
/// let reporter = spawn_stats_reporter(cache.clone(), 10);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter(cache: TransparentCache, interval_secs: u64) -> JoinHandle<()> {
    // A zero interval would spin
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats().await;
            if stats.hits + stats.misses == 0 {
                debug!("Stats report: no lookups yet");
                continue;
            }

            match serde_json::to_string(&stats) {
                Ok(json) => info!(hit_rate = stats.hit_rate(), "Cache stats: {}", json),
                Err(err) => warn!("Failed to serialize cache stats: {}", err),
            }
        }
    })
}
