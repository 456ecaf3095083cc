//! # Cache Invariant Properties
//!
//! Random traces over a handful of tags and sets must never break the structural
//! invariants: sets and the victim cache stay within capacity, a block is never
//! held by both levels at once, and replay is deterministic.

use proptest::prelude::*;

use vcsim_core::config::{ReplacePolicy, StoragePolicy};
use vcsim_core::{AccessResult, Operation};

use crate::common::{addr, geometry, simulator, small};

fn storage() -> impl Strategy<Value = StoragePolicy> {
    prop_oneof![Just(StoragePolicy::Blocking), Just(StoragePolicy::Subblocking)]
}

fn replace() -> impl Strategy<Value = ReplacePolicy> {
    prop_oneof![Just(ReplacePolicy::Lru), Just(ReplacePolicy::NmruFifo)]
}

/// Addresses drawn from 6 tags, 2 sets and every offset, so that sets overflow
/// and blocks cycle through the victim cache.
fn trace() -> impl Strategy<Value = Vec<(bool, u64)>> {
    proptest::collection::vec(
        (any::<bool>(), 0u64..6, 0u64..2, 0u64..16)
            .prop_map(|(write, tag, index, offset)| (write, addr(tag, index, offset))),
        0..200,
    )
}

const fn op(write: bool) -> Operation {
    if write { Operation::Write } else { Operation::Read }
}

proptest! {
    #[test]
    fn capacity_and_exclusivity_hold(t in storage(), r in replace(), events in trace()) {
        let config = small(t, r);
        let g = geometry(&config);
        let mut sim = simulator(&config);

        for &(write, raw) in &events {
            let _ = sim.access(op(write), raw);

            for index in 0..g.num_sets() {
                if let Some(set) = sim.cache.set(index) {
                    prop_assert!(set.len() <= g.associativity() as usize);
                    prop_assert_eq!(set.len(), set.order().len());
                }
            }
            prop_assert!(sim.cache.victim().len() <= g.num_victim_blocks() as usize);
            prop_assert!(!(sim.cache.contains(raw) && sim.cache.victim_contains(raw)));
            // The block just accessed always ends up in its main-cache set.
            prop_assert!(sim.cache.contains(raw));
        }
    }

    #[test]
    fn counters_are_consistent(t in storage(), r in replace(), events in trace()) {
        let mut sim = simulator(&small(t, r));
        let mut victim_hits = 0u64;
        for &(write, raw) in &events {
            if sim.access(op(write), raw) == AccessResult::HitVictim {
                victim_hits += 1;
            }
        }
        let stats = sim.complete();

        prop_assert_eq!(stats.accesses, events.len() as u64);
        prop_assert_eq!(stats.reads + stats.writes, stats.accesses);
        prop_assert!(stats.read_misses_combined <= stats.read_misses);
        prop_assert!(stats.write_misses_combined <= stats.write_misses);
        prop_assert_eq!(stats.victim_hits(), victim_hits);
        prop_assert!(stats.miss_rate >= 0.0 && stats.miss_rate <= 1.0);
    }

    #[test]
    fn replay_is_deterministic(t in storage(), r in replace(), events in trace()) {
        let mut first = simulator(&small(t, r));
        let mut second = simulator(&small(t, r));

        for &(write, raw) in &events {
            prop_assert_eq!(first.access(op(write), raw), second.access(op(write), raw));
        }
        prop_assert_eq!(first.complete(), second.complete());
    }
}
