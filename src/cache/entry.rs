//! Cache Entry Module
//!
//! Defines the memoized result of one successful upstream price lookup.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// A price fetched from the upstream service, with its fetch time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The fetched price
    pub price: f64,
    /// Monotonic creation time, used for freshness checks
    pub created_at: Instant,
    /// Wall-clock fetch time, used for reporting
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(price: f64) -> Self {
        Self {
            price,
            created_at: Instant::now(),
            fetched_at: Utc::now(),
        }
    }

    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals `max_age` is stale, so a
    /// zero `max_age` never yields a fresh entry.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age() < max_age
    }
}
