//! Error types for the price cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Service Error Enum ==
/// Failure reported by an upstream price lookup service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The service could not be reached or refused the request
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service does not know the requested item
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

// == Cache Error Enum ==
/// Unified error type for cache lookups.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream service failed while fetching a price
    #[error("getting price from service for '{item_code}': {source}")]
    Upstream {
        item_code: String,
        #[source]
        source: ServiceError,
    },

    /// One item of a batch lookup failed; `partial` holds the prices
    /// collected for the items preceding it
    #[error("batch lookup failed at '{item_code}': {source}")]
    Batch {
        item_code: String,
        partial: Vec<f64>,
        #[source]
        source: Box<CacheError>,
    },

    /// A spawned lookup task did not run to completion
    #[error("lookup task for '{item_code}' failed: {reason}")]
    TaskFailed { item_code: String, reason: String },
}

impl CacheError {
    /// Returns the prices collected before a batch failure.
    ///
    /// Empty for errors that did not come from a batch lookup.
    pub fn partial_prices(&self) -> &[f64] {
        match self {
            CacheError::Batch { partial, .. } => partial,
            _ => &[],
        }
    }

    /// Returns the item code the failure is attributed to.
    pub fn item_code(&self) -> &str {
        match self {
            CacheError::Upstream { item_code, .. }
            | CacheError::Batch { item_code, .. }
            | CacheError::TaskFailed { item_code, .. } => item_code,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the price cache.
pub type Result<T> = std::result::Result<T, CacheError>;
