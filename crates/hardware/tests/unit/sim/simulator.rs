//! # Simulator Facade Tests
//!
//! `setup` validates, `access` replays one event, `complete` finalizes.

use pretty_assertions::assert_eq;

use vcsim_core::common::error::ConfigError;
use vcsim_core::config::{CacheConfig, ReplacePolicy, StoragePolicy};
use vcsim_core::sim::TraceEvent;
use vcsim_core::{AccessResult, Operation, Simulator};

use crate::common::{addr, config, simulator, small};

#[test]
fn setup_rejects_invalid_geometry() {
    let bad = config(10, 6, 5, 0, StoragePolicy::Blocking, ReplacePolicy::Lru);
    assert!(matches!(
        Simulator::setup(&bad),
        Err(ConfigError::SetBitsTooLarge { .. })
    ));
}

#[test]
fn setup_starts_empty() {
    let sim = simulator(&CacheConfig::default());
    assert_eq!(sim.stats().accesses, 0);
    assert!(sim.cache.victim().is_empty());
    assert!(sim.cache.set(0).is_none());
    assert_eq!(sim.geometry().associativity(), 8);
}

#[test]
fn access_updates_running_counters() {
    let mut sim = simulator(&CacheConfig::default());
    assert_eq!(sim.access(Operation::Read, 0x1000), AccessResult::Miss);
    assert_eq!(sim.access(Operation::Write, 0x1004), AccessResult::Hit);

    let stats = sim.stats();
    assert_eq!(stats.accesses, 2);
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.read_misses, 1);
    assert_eq!(stats.write_misses, 0);
}

#[test]
fn replay_matches_individual_accesses() {
    let events: Vec<TraceEvent> = (0..40u64)
        .map(|i| {
            let op = if i % 3 == 0 { Operation::Write } else { Operation::Read };
            TraceEvent::new(op, addr(i % 5, i % 2, i % 16))
        })
        .collect();
    let config = small(StoragePolicy::Subblocking, ReplacePolicy::NmruFifo);

    let mut batch = simulator(&config);
    batch.replay(&events);

    let mut single = simulator(&config);
    for e in &events {
        let _ = single.access(e.op, e.address);
    }

    assert_eq!(batch.complete(), single.complete());
}

/// The final report always carries the geometry-derived metrics.
#[test]
fn complete_fills_derived_fields() {
    let mut sim = simulator(&CacheConfig::default());
    let _ = sim.access(Operation::Read, 0);
    let stats = sim.complete();

    assert_eq!(stats.hit_time, 2);
    assert_eq!(stats.miss_penalty, 60);
    assert_eq!(stats.storage_overhead, 63764);
    assert!(!stats.empty_trace);
}
