//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Stats Reporter: Logs cache statistics at configured intervals

mod stats_reporter;

pub use stats_reporter::spawn_stats_reporter;
