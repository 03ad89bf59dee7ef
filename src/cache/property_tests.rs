//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the store's accounting and retention invariants
//! under arbitrary operation sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::cache::{CacheStore, FifoPolicy, LifoPolicy, MemoryBackend};

// == Test Configuration ==
const TEST_CAPACITY_BYTES: usize = 4096;

fn fifo_store() -> CacheStore {
    CacheStore::new(
        Box::new(FifoPolicy),
        Box::new(MemoryBackend::new()),
        TEST_CAPACITY_BYTES,
    )
}

fn lifo_store() -> CacheStore {
    CacheStore::new(
        Box::new(LifoPolicy),
        Box::new(MemoryBackend::new()),
        TEST_CAPACITY_BYTES,
    )
}

/// Sums the per-entry sizes reported by the diagnostic listing.
fn sum_of_described_sizes(store: &CacheStore) -> usize {
    store
        .describe()
        .lines()
        .map(|line| {
            let size_part = line
                .rsplit("size=")
                .next()
                .and_then(|rest| rest.strip_suffix(" bytes"))
                .expect("describe line shape");
            size_part.parse::<usize>().expect("numeric size")
        })
        .sum()
}

// == Strategies ==
/// Generates valid cache keys (non-empty, small pool to force collisions)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,3}".prop_map(|s| s)
}

/// Generates valid payloads (non-empty, well under the test capacity)
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..512)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, data: Vec<u8> },
    Get { key: String },
    SetCapacity { kb: i64 },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), payload_strategy())
            .prop_map(|(key, data)| CacheOp::Put { key, data }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => (1i64..8).prop_map(|kb| CacheOp::SetCapacity { kb }),
        1 => Just(CacheOp::Clear),
    ]
}

fn apply(store: &mut CacheStore, op: CacheOp) {
    match op {
        CacheOp::Put { key, data } => {
            store.put(&key, &data).unwrap();
        }
        CacheOp::Get { key } => {
            let _ = store.get(&key);
        }
        CacheOp::SetCapacity { kb } => {
            store.set_capacity(kb).unwrap();
        }
        CacheOp::Clear => store.clear(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The running size counter always equals the sum of the sizes of the
    // entries actually retained, after every operation.
    #[test]
    fn prop_size_matches_sum_of_entries(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut store = fifo_store();

        for op in ops {
            apply(&mut store, op);
            prop_assert_eq!(store.size(), sum_of_described_sizes(&store), "Size counter out of sync");
        }
    }

    // Between operations the store never sits above its byte budget, since
    // every generated payload fits the smallest generated capacity alone.
    #[test]
    fn prop_capacity_is_enforced(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut store = fifo_store();

        for op in ops {
            apply(&mut store, op);
            prop_assert!(store.size() <= store.capacity(), "Store left over budget");
        }
    }

    // Same accounting invariants must hold when trimming from the back.
    #[test]
    fn prop_lifo_accounting_matches(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut store = lifo_store();

        for op in ops {
            apply(&mut store, op);
            prop_assert_eq!(store.size(), sum_of_described_sizes(&store), "Size counter out of sync");
            prop_assert!(store.size() <= store.capacity(), "Store left over budget");
        }
    }

    // Storing a value and retrieving it immediately returns the same bytes.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), data in payload_strategy()) {
        let mut store = fifo_store();

        store.put(&key, &data).unwrap();

        let retrieved = store.get(&key).expect("entry must be retained under budget");
        prop_assert_eq!(retrieved.as_ref(), data.as_slice(), "Round-trip value mismatch");
    }

    // Overwriting a key keeps a single entry whose payload is the new value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        data1 in payload_strategy(),
        data2 in payload_strategy()
    ) {
        let mut store = fifo_store();

        store.put(&key, &data1).unwrap();
        store.put(&key, &data2).unwrap();

        let retrieved = store.get(&key).expect("entry must be retained under budget");
        prop_assert_eq!(retrieved.as_ref(), data2.as_slice(), "Overwrite should return new value");
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
        prop_assert_eq!(store.size(), data2.len(), "Size should track the new payload");
    }

    // Clearing is idempotent and makes every previously-inserted key absent.
    #[test]
    fn prop_clear_is_idempotent(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut store = fifo_store();
        let mut keys_seen: HashSet<String> = HashSet::new();

        for op in ops {
            if let CacheOp::Put { key, .. } = &op {
                keys_seen.insert(key.clone());
            }
            apply(&mut store, op);
        }

        store.clear();
        prop_assert_eq!(store.size(), 0);
        prop_assert!(store.is_empty());

        store.clear();
        prop_assert_eq!(store.size(), 0);

        for key in &keys_seen {
            prop_assert!(store.get(key).is_none(), "Key survived clear");
        }
    }

    // Under FIFO, inserting distinct equally-sized keys retains a suffix of
    // the insertion order; under LIFO, a prefix.
    #[test]
    fn prop_retention_is_a_run_of_insertion_order(count in 1usize..12) {
        const ENTRY_SIZE: usize = 1000;
        let retained = TEST_CAPACITY_BYTES / ENTRY_SIZE;

        let mut fifo = fifo_store();
        let mut lifo = lifo_store();
        let keys: Vec<String> = (0..count).map(|i| format!("k{:02}", i)).collect();

        for key in &keys {
            fifo.put(key, &vec![0u8; ENTRY_SIZE]).unwrap();
            lifo.put(key, &vec![0u8; ENTRY_SIZE]).unwrap();
        }

        let cutoff = count.saturating_sub(retained);
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(fifo.get(key).is_some(), i >= cutoff, "FIFO retains the newest run");
            prop_assert_eq!(lifo.get(key).is_some(), i < retained, "LIFO retains the oldest run");
        }
    }
}
