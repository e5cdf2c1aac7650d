//! Transparent Cache Module
//!
//! Read-through price cache in front of a [`PriceService`]. Prices younger
//! than the freshness window are served from memory; anything else is
//! fetched upstream and written back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::service::PriceService;

// == Transparent Cache ==
/// Time-bounded memoization of upstream price lookups.
///
/// Cloning is cheap and clones share the same store and service.
#[derive(Clone)]
pub struct TransparentCache {
    /// Upstream collaborator, shared with the caller
    service: Arc<dyn PriceService>,
    /// Store guarded for both reads and writes
    store: Arc<RwLock<CacheStore>>,
    /// Freshness window, fixed at construction
    max_age: Duration,
}

impl TransparentCache {
    // == Constructor ==
    /// Creates a cache with an empty store.
    ///
    /// A zero `max_age` disables reuse: every lookup goes upstream.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        Self {
            service,
            store: Arc::new(RwLock::new(CacheStore::new())),
            max_age,
        }
    }

    /// Creates a cache using the freshness window from `config`.
    pub fn from_config(service: Arc<dyn PriceService>, config: &Config) -> Self {
        Self::new(service, config.max_age())
    }

    // == Get Price ==
    /// Returns the price for `item_code`, from memory if fresh, otherwise
    /// from the upstream service.
    ///
    /// A failed fetch is returned as [`CacheError::Upstream`] and leaves the
    /// store as it was, including any stale entry. Failures are not cached
    /// and not retried.
    pub async fn get_price(&self, item_code: &str) -> Result<f64> {
        let cached = self.store.write().await.lookup(item_code, self.max_age);
        if let Some(price) = cached {
            debug!(item_code, price, "cache hit");
            return Ok(price);
        }

        debug!(item_code, "cache miss, fetching from upstream");

        // The store lock is not held across the upstream call
        match self.service.get_price_for(item_code).await {
            Ok(price) => {
                self.store
                    .write()
                    .await
                    .insert(item_code.to_string(), price);
                Ok(price)
            }
            Err(source) => {
                self.store.write().await.record_upstream_failure();
                warn!(item_code, error = %source, "upstream price lookup failed");
                Err(CacheError::Upstream {
                    item_code: item_code.to_string(),
                    source,
                })
            }
        }
    }

    // == Get Prices ==
    /// Looks up several items concurrently, one task per item.
    ///
    /// Prices are returned in input order. Every task runs to completion
    /// before this returns. If any item fails, the error is reported for the
    /// first failing item in input order as [`CacheError::Batch`], carrying
    /// the prices of the items before it. Items that succeeded are cached
    /// regardless.
    pub async fn get_prices<I, S>(&self, item_codes: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item_codes: Vec<String> = item_codes.into_iter().map(Into::into).collect();
        if item_codes.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = item_codes.len(), "starting batch price lookup");

        let handles: Vec<_> = item_codes
            .iter()
            .map(|item_code| {
                let cache = self.clone();
                let item_code = item_code.clone();
                tokio::spawn(async move { cache.get_price(&item_code).await })
            })
            .collect();

        // Await every task, even after a failure has been seen
        let mut outcomes = Vec::with_capacity(handles.len());
        for (item_code, handle) in item_codes.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(CacheError::TaskFailed {
                    item_code: item_code.clone(),
                    reason: join_err.to_string(),
                }),
            };
            outcomes.push(outcome);
        }

        let mut prices = Vec::with_capacity(outcomes.len());
        for (item_code, outcome) in item_codes.into_iter().zip(outcomes) {
            match outcome {
                Ok(price) => prices.push(price),
                Err(source) => {
                    return Err(CacheError::Batch {
                        item_code,
                        partial: prices,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(prices)
    }

    // == Inspection ==
    /// The freshness window this cache was built with.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Returns the stored entry for `item_code`, fresh or stale.
    pub async fn cached_entry(&self, item_code: &str) -> Option<CacheEntry> {
        self.store.read().await.peek(item_code)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

impl std::fmt::Debug for TransparentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransparentCache")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}
