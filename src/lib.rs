//! Price Cache - A read-through cache for slow price lookups
//!
//! Serves prices from memory while they are fresh and fetches them from an
//! upstream service otherwise, with concurrent batch lookups.

pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod tasks;

pub use cache::TransparentCache;
pub use config::Config;
pub use error::{CacheError, Result, ServiceError};
pub use service::{PriceService, SimulatedPriceService};
pub use tasks::spawn_stats_reporter;
