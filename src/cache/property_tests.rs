//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check size bounds, statistics accounting and LRU ordering
//! over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::CacheStore;
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;

fn store_with(max_size: usize) -> CacheStore<String, String> {
    let config = CacheConfig::builder()
        .max_size(max_size)
        .unwrap()
        .expiration_minutes(5)
        .unwrap()
        .build();
    CacheStore::new(&config)
}

// == Strategies ==
/// Generates short keys so that operation sequences collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e][0-9]{0,1}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every counter matches the outcome of the operations that produced it.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = store_with(8);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_puts: u64 = 0;
        let mut expected_removals: u64 = 0;
        let mut fresh_inserts: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    if !store.contains_key(&key) {
                        fresh_inserts += 1;
                    }
                    store.put(key, value);
                    expected_puts += 1;
                }
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { key } => {
                    if store.remove(&key) {
                        expected_removals += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.puts, expected_puts, "Puts mismatch");
        prop_assert_eq!(stats.removals, expected_removals, "Removals mismatch");
        // Nothing expires here: every fresh key is either still stored,
        // removed explicitly or evicted.
        prop_assert!(store.len() <= 8);
        prop_assert_eq!(
            stats.evictions + stats.removals + store.len() as u64,
            fresh_inserts
        );
    }

    // The store never holds more than its max size after any put.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((value_strategy(), value_strategy()), 1..200),
        max_size in 1usize..20
    ) {
        let mut store = store_with(max_size);

        for (key, value) in entries {
            store.put(key, value);
            prop_assert!(
                store.len() <= max_size,
                "Cache size {} exceeds max {}",
                store.len(),
                max_size
            );
        }
    }

    // Storing V1 then V2 under one key returns V2 and keeps a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = store_with(TEST_MAX_SIZE);

        store.put(key.clone(), value1);
        store.put(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Filling to capacity and inserting one more evicts the first inserted key.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(value_strategy(), 2..10),
        new_key in value_strategy()
    ) {
        let keys = unique(initial_keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let capacity = keys.len();
        let mut store = store_with(capacity);
        for key in &keys {
            store.put(key.clone(), format!("value_{}", key));
        }

        store.put(new_key.clone(), "new".to_string());

        prop_assert_eq!(store.len(), capacity);
        prop_assert_eq!(store.stats().evictions, 1);
        prop_assert!(!store.contains_key(&keys[0]), "Oldest key should be evicted");
        prop_assert!(store.contains_key(&new_key));
        for key in keys.iter().skip(1) {
            prop_assert!(store.contains_key(key), "Key '{}' should remain", key);
        }
    }

    // A key read after filling becomes most recent; the next oldest is evicted instead.
    #[test]
    fn prop_lru_access_tracking(
        initial_keys in prop::collection::vec(value_strategy(), 3..8),
        access_index in 0usize..8,
        new_key in value_strategy()
    ) {
        let keys = unique(initial_keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let mut store = store_with(keys.len());
        for key in &keys {
            store.put(key.clone(), key.clone());
        }

        let accessed = keys[access_index % keys.len()].clone();
        prop_assert!(store.get(&accessed).is_some());

        let expected_evicted = keys.iter().find(|k| **k != accessed).cloned().unwrap();

        store.put(new_key.clone(), "new".to_string());

        prop_assert!(store.contains_key(&accessed), "Accessed key must survive");
        prop_assert!(!store.contains_key(&expected_evicted), "Oldest untouched key must go");
        prop_assert!(store.contains_key(&new_key));
    }
}
