//! Property tests over random access streams.

use cachesim_core::{AccessResponse, Cache, CacheConfig, ReplacementPolicy, WritePolicy};
use proptest::prelude::*;

use crate::common::test_config;

const SETS: usize = 4;

/// `(is_write, set_index, tag)`; few tags so that hits and conflicts both occur.
fn ops() -> impl Strategy<Value = Vec<(bool, usize, u64)>> {
    prop::collection::vec((any::<bool>(), 0..SETS, 0..12u64), 0..200)
}

fn policies() -> impl Strategy<Value = (WritePolicy, ReplacementPolicy)> {
    (
        prop_oneof![Just(WritePolicy::WriteBack), Just(WritePolicy::WriteThrough)],
        prop_oneof![Just(ReplacementPolicy::Lru), Just(ReplacementPolicy::Random)],
    )
}

fn config(policies: (WritePolicy, ReplacementPolicy), ways: usize, seed: u64) -> CacheConfig {
    CacheConfig {
        seed,
        ..test_config(SETS, ways, 8, policies.0, policies.1)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every access is either a hit or a miss.
    #[test]
    fn hits_plus_misses_is_access_count(
        ops in ops(),
        policies in policies(),
        ways in 1..5usize,
        seed in any::<u64>(),
    ) {
        let mut cache = Cache::new(config(policies, ways, seed));
        let mut response = AccessResponse::default();
        for &(is_write, set, tag) in &ops {
            cache.access(&mut response, is_write, set, tag);
        }
        prop_assert_eq!(response.accesses(), ops.len() as u64);
        prop_assert!(response.evictions <= response.misses);
    }

    /// A read leaves its block resident, so an immediate re-read hits.
    #[test]
    fn loaded_block_hits_until_replaced(
        ops in ops(),
        policies in policies(),
        ways in 1..5usize,
    ) {
        let mut cache = Cache::new(config(policies, ways, 1));
        for &(is_write, set, tag) in &ops {
            let mut response = AccessResponse::default();
            cache.access(&mut response, is_write, set, tag);
            if !is_write {
                prop_assert!(cache.contains(set, tag));
                let mut again = AccessResponse::default();
                cache.access(&mut again, false, set, tag);
                prop_assert_eq!(again.hits, 1);
                prop_assert_eq!(again.cycles, cache.config().cache_access_cycles);
            }
        }
    }

    /// Under write-back, a written block never stays resident.
    #[test]
    fn write_back_write_leaves_block_invalid(
        ops in ops(),
        replacement in prop_oneof![Just(ReplacementPolicy::Lru), Just(ReplacementPolicy::Random)],
    ) {
        let mut cache = Cache::new(config((WritePolicy::WriteBack, replacement), 2, 9));
        for &(is_write, set, tag) in &ops {
            let mut response = AccessResponse::default();
            cache.access(&mut response, is_write, set, tag);
            if is_write {
                prop_assert!(!cache.contains(set, tag));
            }
            prop_assert_eq!(response.dirty_evictions, 0);
        }
    }

    /// Same seed and same stream give the same statistics and contents.
    #[test]
    fn random_replacement_is_reproducible(ops in ops(), seed in any::<u64>()) {
        let cfg = config((WritePolicy::WriteThrough, ReplacementPolicy::Random), 3, seed);
        let mut a = Cache::new(cfg.clone());
        let mut b = Cache::new(cfg);
        let mut ra = AccessResponse::default();
        let mut rb = AccessResponse::default();
        for &(is_write, set, tag) in &ops {
            a.access(&mut ra, is_write, set, tag);
            b.access(&mut rb, is_write, set, tag);
        }
        prop_assert_eq!(ra, rb);
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    /// No set ever holds two valid lines with the same tag.
    #[test]
    fn no_duplicate_resident_tags(ops in ops(), policies in policies()) {
        let mut cache = Cache::new(config(policies, 4, 3));
        let mut response = AccessResponse::default();
        for &(is_write, set, tag) in &ops {
            cache.access(&mut response, is_write, set, tag);
        }
        for set in cache.sets() {
            let mut tags: Vec<u64> = set.lines().filter(|l| l.is_valid()).map(|l| l.tag()).collect();
            let resident = tags.len();
            tags.sort_unstable();
            tags.dedup();
            prop_assert_eq!(tags.len(), resident);
        }
    }
}
