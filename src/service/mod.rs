//! Price Service Module
//!
//! The upstream collaborator boundary and an in-process simulated upstream.

mod simulated;

use async_trait::async_trait;

use crate::error::ServiceError;

pub use simulated::{simulated_price, SimulatedPriceService};

// == Price Service ==
/// An expensive, fallible lookup of the price for an item.
///
/// Latency and failure behavior are up to the implementation; callers
/// must not assume either is bounded.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Fetches the current price for `item_code`.
    async fn get_price_for(&self, item_code: &str) -> Result<f64, ServiceError>;
}
