//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check freshness, batch and statistics behavior.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, TransparentCache};
use crate::service::SimulatedPriceService;

// == Test Configuration ==
const TEST_MAX_AGE: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates item codes, including the empty code
fn item_code_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{0,16}".prop_map(|s| s)
}

fn price_strategy() -> impl Strategy<Value = f64> {
    0.0f64..10_000.0
}

/// Generates a batch of distinct item codes
fn distinct_items_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(item_code_strategy(), 1..max)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

#[derive(Debug, Clone)]
enum StoreOp {
    Insert { item_code: String, price: f64 },
    Lookup { item_code: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (item_code_strategy(), price_strategy())
            .prop_map(|(item_code, price)| StoreOp::Insert { item_code, price }),
        item_code_strategy().prop_map(|item_code| StoreOp::Lookup { item_code }),
    ]
}

fn cache_for(service: &Arc<SimulatedPriceService>) -> TransparentCache {
    TransparentCache::new(service.clone(), TEST_MAX_AGE)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of inserts and lookups within the freshness window,
    // a lookup hits exactly when the item was inserted before, and the
    // statistics count every hit, miss and fetch.
    #[test]
    fn prop_store_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let mut store = CacheStore::new();
        let mut inserted = HashSet::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_fetches: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Insert { item_code, price } => {
                    store.insert(item_code.clone(), price);
                    inserted.insert(item_code);
                    expected_fetches += 1;
                }
                StoreOp::Lookup { item_code } => {
                    let found = store.lookup(&item_code, TEST_MAX_AGE);
                    prop_assert_eq!(found.is_some(), inserted.contains(&item_code));
                    if found.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.fetches, expected_fetches, "Fetches mismatch");
        prop_assert_eq!(stats.total_entries, inserted.len(), "Total entries mismatch");
    }

    // For any item, two lookups within the freshness window return the same
    // price and call upstream once.
    #[test]
    fn prop_freshness(item_code in item_code_strategy(), price in price_strategy()) {
        let service = Arc::new(SimulatedPriceService::new().with_price(item_code.clone(), price));
        let cache = cache_for(&service);

        let (first, second) = tokio_test::block_on(async {
            let first = cache.get_price(&item_code).await.unwrap();
            let second = cache.get_price(&item_code).await.unwrap();
            (first, second)
        });

        prop_assert_eq!(first, price);
        prop_assert_eq!(second, price);
        prop_assert_eq!(service.calls_for(&item_code), 1);
    }

    // For any batch of non-failing items, the result has one price per item,
    // in input order, equal to what a single lookup returns.
    #[test]
    fn prop_batch_completeness(items in distinct_items_strategy(20)) {
        let service = Arc::new(SimulatedPriceService::new());
        let cache = cache_for(&service);

        let prices = tokio_test::block_on(cache.get_prices(items.clone())).unwrap();

        prop_assert_eq!(prices.len(), items.len());
        for (item_code, price) in items.iter().zip(&prices) {
            prop_assert_eq!(*price, service.price_of(item_code));
            let single = tokio_test::block_on(cache.get_price(item_code)).unwrap();
            prop_assert_eq!(*price, single);
        }
        // Single lookups were all hits
        prop_assert_eq!(service.total_calls(), items.len() as u64);
    }

    // For any batch with one failing item, the batch reports an error for it
    // and every other item ends up cached with its upstream price.
    #[test]
    fn prop_batch_failure_propagation(
        items in distinct_items_strategy(12),
        failing_index in any::<prop::sample::Index>()
    ) {
        let failing = items[failing_index.index(items.len())].clone();
        let service = Arc::new(SimulatedPriceService::new());
        service.fail_item(&failing);
        let cache = cache_for(&service);

        let err = tokio_test::block_on(cache.get_prices(items.clone())).unwrap_err();

        prop_assert_eq!(err.item_code(), failing.as_str());
        let position = items.iter().position(|i| *i == failing).unwrap();
        prop_assert_eq!(err.partial_prices().len(), position);

        for item_code in &items {
            let entry = tokio_test::block_on(cache.cached_entry(item_code));
            if *item_code == failing {
                prop_assert!(entry.is_none());
            } else {
                prop_assert_eq!(entry.map(|e| e.price), Some(service.price_of(item_code)));
            }
        }
    }
}
