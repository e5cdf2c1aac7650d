//! Price Cache demo runner
//!
//! Puts a TransparentCache in front of a simulated slow price service and
//! repeatedly looks up a fixed set of items, logging hits and fetches.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use price_cache::{spawn_stats_reporter, Config, SimulatedPriceService, TransparentCache};

/// Main entry point for the price cache demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Wire the simulated upstream service into the cache
/// 4. Start background stats reporter
/// 5. Look up the demo items on every tick
/// 6. Stop on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "price_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting price cache demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_age={}ms, upstream_latency={}ms, items={:?}, failing={:?}",
        config.max_age_ms,
        config.upstream_latency_ms,
        config.demo_items,
        config.upstream_failing_items
    );

    if config.demo_items.is_empty() {
        anyhow::bail!("DEMO_ITEMS must name at least one item");
    }

    let service = Arc::new(SimulatedPriceService::from_config(&config));
    let cache = TransparentCache::from_config(service.clone(), &config);
    info!("Price cache initialized");

    let reporter = spawn_stats_reporter(cache.clone(), config.stats_report_interval);

    let mut ticker = tokio::time::interval(Duration::from_secs(config.lookup_interval.max(1)));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let started = tokio::time::Instant::now();
                match cache.get_prices(config.demo_items.iter().cloned()).await {
                    Ok(prices) => info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        upstream_calls = service.total_calls(),
                        "Prices: {:?}",
                        prices
                    ),
                    Err(err) => warn!(
                        partial = ?err.partial_prices(),
                        "Batch lookup failed: {}",
                        err
                    ),
                }
            }
            _ = &mut shutdown => break,
        }
    }

    reporter.abort();
    warn!("Stats reporter aborted");

    let stats = cache.stats().await;
    info!(
        "Shutdown complete: hits={}, misses={}, fetches={}, upstream_failures={}",
        stats.hits, stats.misses, stats.fetches, stats.upstream_failures
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
