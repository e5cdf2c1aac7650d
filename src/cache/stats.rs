//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and upstream calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from a fresh entry
    pub hits: u64,
    /// Number of lookups that found no entry or a stale one
    pub misses: u64,
    /// Number of successful upstream fetches written to the store
    pub fetches: u64,
    /// Number of failed upstream fetches
    pub upstream_failures: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Wall-clock time of the last successful fetch
    pub last_fetch_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a successful fetch made at `at`.
    pub fn record_fetch(&mut self, at: DateTime<Utc>) {
        self.fetches += 1;
        self.last_fetch_at = Some(at);
    }

    pub fn record_upstream_failure(&mut self) {
        self.upstream_failures += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
