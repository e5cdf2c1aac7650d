//! Simulated Price Service
//!
//! Stand-in for a slow remote price service, used by the demo binary and tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::error::ServiceError;
use crate::service::PriceService;

/// Deterministic default price for an item code, in the range 0.00..=99.99.
pub fn simulated_price(item_code: &str) -> f64 {
    let cents = item_code
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
        % 10_000;
    cents as f64 / 100.0
}

// == Simulated Price Service ==
/// In-process price service with configurable latency and failures.
///
/// Prices come from explicit overrides, falling back to [`simulated_price`].
/// Every call is counted, including failed ones.
#[derive(Debug, Default)]
pub struct SimulatedPriceService {
    latency: Duration,
    prices: HashMap<String, f64>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<HashMap<String, u64>>,
    total_calls: AtomicU64,
}

impl SimulatedPriceService {
    // == Constructor ==
    /// Creates a service with no latency, no overrides and no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service from the upstream settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        let service = Self::new().with_latency(config.upstream_latency());
        for item_code in &config.upstream_failing_items {
            service.fail_item(item_code);
        }
        service
    }

    /// Sets the delay applied to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fixes the price returned for `item_code`.
    pub fn with_price(mut self, item_code: impl Into<String>, price: f64) -> Self {
        self.prices.insert(item_code.into(), price);
        self
    }

    /// Makes every subsequent call for `item_code` fail.
    pub fn fail_item(&self, item_code: &str) {
        lock(&self.failing).insert(item_code.to_string());
    }

    /// Makes calls for `item_code` succeed again.
    pub fn recover_item(&self, item_code: &str) {
        lock(&self.failing).remove(item_code);
    }

    /// Number of calls made for `item_code`.
    pub fn calls_for(&self, item_code: &str) -> u64 {
        lock(&self.calls).get(item_code).copied().unwrap_or(0)
    }

    /// Number of calls made for all items.
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// The price a successful call for `item_code` returns.
    pub fn price_of(&self, item_code: &str) -> f64 {
        self.prices
            .get(item_code)
            .copied()
            .unwrap_or_else(|| simulated_price(item_code))
    }
}

#[async_trait]
impl PriceService for SimulatedPriceService {
    async fn get_price_for(&self, item_code: &str) -> Result<f64, ServiceError> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.calls).entry(item_code.to_string()).or_insert(0) += 1;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if lock(&self.failing).contains(item_code) {
            debug!(item_code, "simulated upstream failure");
            return Err(ServiceError::Unavailable(format!(
                "price lookup for '{}' rejected",
                item_code
            )));
        }

        Ok(self.price_of(item_code))
    }
}

// Counters stay meaningful even if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
