//! Configuration Module
//!
//! Handles loading cache and demo settings from environment variables.

use std::env;
use std::time::Duration;

/// Price cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window in milliseconds (0 = always re-fetch)
    pub max_age_ms: u64,
    /// Simulated upstream latency in milliseconds
    pub upstream_latency_ms: u64,
    /// Item codes the simulated upstream fails for
    pub upstream_failing_items: Vec<String>,
    /// Item codes looked up by the demo loop
    pub demo_items: Vec<String>,
    /// Demo lookup interval in seconds
    pub lookup_interval: u64,
    /// Statistics report interval in seconds
    pub stats_report_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_AGE_MS` - Freshness window in ms (default: 60000)
    /// - `UPSTREAM_LATENCY_MS` - Simulated upstream latency in ms (default: 250)
    /// - `UPSTREAM_FAILING_ITEMS` - Comma separated failing items (default: none)
    /// - `DEMO_ITEMS` - Comma separated items to look up (default: apple,banana,cherry)
    /// - `LOOKUP_INTERVAL` - Lookup frequency in seconds (default: 2)
    /// - `STATS_REPORT_INTERVAL` - Stats report frequency in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_age_ms: parse_var("CACHE_MAX_AGE_MS").unwrap_or(defaults.max_age_ms),
            upstream_latency_ms: parse_var("UPSTREAM_LATENCY_MS")
                .unwrap_or(defaults.upstream_latency_ms),
            upstream_failing_items: env::var("UPSTREAM_FAILING_ITEMS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.upstream_failing_items),
            demo_items: env::var("DEMO_ITEMS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.demo_items),
            lookup_interval: parse_var("LOOKUP_INTERVAL").unwrap_or(defaults.lookup_interval),
            stats_report_interval: parse_var("STATS_REPORT_INTERVAL")
                .unwrap_or(defaults.stats_report_interval),
        }
    }

    /// Returns the freshness window as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    /// Returns the simulated upstream latency as a Duration.
    pub fn upstream_latency(&self) -> Duration {
        Duration::from_millis(self.upstream_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age_ms: 60_000,
            upstream_latency_ms: 250,
            upstream_failing_items: Vec::new(),
            demo_items: vec![
                "apple".to_string(),
                "banana".to_string(),
                "cherry".to_string(),
            ],
            lookup_interval: 2,
            stats_report_interval: 10,
        }
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma separated list, dropping blank items.
///
/// Item codes are otherwise kept verbatim (case-sensitive).
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_age_ms, 60_000);
        assert_eq!(config.max_age(), Duration::from_secs(60));
        assert_eq!(config.upstream_latency(), Duration::from_millis(250));
        assert!(config.upstream_failing_items.is_empty());
        assert_eq!(config.demo_items, vec!["apple", "banana", "cherry"]);
        assert_eq!(config.lookup_interval, 2);
        assert_eq!(config.stats_report_interval, 10);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_MAX_AGE_MS");
        env::remove_var("UPSTREAM_LATENCY_MS");
        env::remove_var("UPSTREAM_FAILING_ITEMS");
        env::remove_var("DEMO_ITEMS");
        env::remove_var("LOOKUP_INTERVAL");
        env::remove_var("STATS_REPORT_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.max_age_ms, 60_000);
        assert_eq!(config.upstream_latency_ms, 250);
        assert!(config.upstream_failing_items.is_empty());
        assert_eq!(config.demo_items.len(), 3);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("A, b ,,C"), vec!["A", "b", "C"]);
        assert!(split_list(" , ").is_empty());
    }
}
