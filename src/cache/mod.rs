//! Cache Module
//!
//! Provides the read-through price cache and its storage.

mod entry;
mod stats;
mod store;
mod transparent;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use transparent::TransparentCache;
