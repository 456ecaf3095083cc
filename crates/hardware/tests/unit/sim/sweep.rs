//! # Design-Space Sweep Tests

use pretty_assertions::assert_eq;

use vcsim_core::Operation;
use vcsim_core::config::{ReplacePolicy, StoragePolicy};
use vcsim_core::sim::TraceEvent;
use vcsim_core::sim::sweep::{SweepPoint, SweepSpace, best_by_aat, evaluate, run_sweep};

use crate::common::config;

fn tiny_space() -> SweepSpace {
    SweepSpace {
        c: 8..=8,
        b: 4..=5,
        storage: vec![StoragePolicy::Blocking],
        replace: vec![ReplacePolicy::Lru],
    }
}

fn looping_trace() -> Vec<TraceEvent> {
    (0..4)
        .flat_map(|_| (0..64u64).map(|i| TraceEvent::new(Operation::Read, i * 24)))
        .collect()
}

fn point(aat: f64, total_size_bytes: u64) -> SweepPoint {
    SweepPoint {
        c: 15,
        b: 5,
        s: 0,
        v: 0,
        t: 'B',
        r: 'L',
        aat,
        miss_rate: 0.0,
        total_size_bytes,
    }
}

/// For C=8: B=4 gives S in 0..4 (10 victim sizes), B=5 gives S in 0..3 (6).
#[test]
fn tiny_space_enumeration() {
    let configs = tiny_space().configs();
    assert_eq!(configs.len(), 16);
    assert!(configs.iter().all(|c| c.v <= c.s && c.b + c.s < c.c));
    assert_eq!(configs[0], config(8, 4, 0, 0, StoragePolicy::Blocking, ReplacePolicy::Lru));
}

/// 164 geometries for each of the four policy combinations.
#[test]
fn default_space_size() {
    let configs = SweepSpace::default().configs();
    assert_eq!(configs.len(), 4 * 164);
    assert!(configs.iter().all(|c| c.c == 15 && (6..=13).contains(&c.b)));
}

#[test]
fn every_point_is_evaluated() {
    let events = looping_trace();
    let points = run_sweep(&tiny_space(), &events).expect("valid space");

    assert_eq!(points.len(), 16);
    for p in &points {
        assert!(p.aat > 0.0);
        assert!(p.miss_rate > 0.0 && p.miss_rate <= 1.0);
        assert!(p.total_size_bytes > 256);
        assert_eq!((p.t, p.r), ('B', 'L'));
    }
}

#[test]
fn evaluate_matches_a_direct_run() {
    let events = looping_trace();
    let cfg = config(8, 4, 1, 1, StoragePolicy::Subblocking, ReplacePolicy::NmruFifo);
    let p = evaluate(&cfg, &events).expect("valid config");

    let mut sim = crate::common::simulator(&cfg);
    sim.replay(&events);
    let stats = sim.complete();

    assert_eq!(p.aat, stats.avg_access_time);
    assert_eq!(p.miss_rate, stats.miss_rate);
    assert_eq!((p.s, p.v, p.t, p.r), (1, 1, 'S', 'N'));
}

#[test]
fn best_prefers_lowest_aat_then_smallest_size() {
    assert_eq!(best_by_aat(&[]), None);

    let points = [point(3.0, 100), point(2.0, 300), point(2.0, 200), point(2.5, 50)];
    let best = best_by_aat(&points).expect("non-empty");
    assert_eq!(best.total_size_bytes, 200);
}
