//! Cache Store Module
//!
//! Price storage keyed by item code, with freshness checks and statistics.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Mapping from item code to the last successfully fetched price.
///
/// Entries are overwritten on every successful fetch and never removed;
/// a stale entry simply stops being served.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Item code to entry storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Returns the cached price if the entry exists and is younger than `max_age`.
    ///
    /// A fresh entry counts as a hit. A missing or stale entry counts as a
    /// miss and is left in place.
    pub fn lookup(&mut self, item_code: &str, max_age: Duration) -> Option<f64> {
        match self.entries.get(item_code) {
            Some(entry) if entry.is_fresh(max_age) => {
                self.stats.record_hit();
                Some(entry.price)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a freshly fetched price, overwriting any prior entry.
    pub fn insert(&mut self, item_code: String, price: f64) {
        let entry = CacheEntry::new(price);
        self.stats.record_fetch(entry.fetched_at);
        self.entries.insert(item_code, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Counts a failed upstream fetch. Entries are not touched.
    pub fn record_upstream_failure(&mut self) {
        self.stats.record_upstream_failure();
    }

    // == Peek ==
    /// Returns a copy of the entry for `item_code`, fresh or not,
    /// without affecting statistics.
    pub fn peek(&self, item_code: &str) -> Option<CacheEntry> {
        self.entries.get(item_code).cloned()
    }

    pub fn contains_key(&self, item_code: &str) -> bool {
        self.entries.contains_key(item_code)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
