//! Design-space sweep.
//!
//! Replays one trace against every configuration of a parameter space and reports
//! the access time / storage trade-off of each point. The default space is the
//! 32 KiB exploration: both storage and replacement policies, blocks of 64 B to
//! 8 KiB, every associativity that leaves at least two sets, and every victim size
//! up to the associativity.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::common::error::ConfigError;
use crate::config::{CacheConfig, ReplacePolicy, StoragePolicy, limits};
use crate::sim::simulator::Simulator;
use crate::sim::trace::TraceEvent;

/// Parameter ranges to explore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSpace {
    /// Total size exponents.
    pub c: RangeInclusive<u32>,
    /// Block size exponents.
    pub b: RangeInclusive<u32>,
    /// Storage policies.
    pub storage: Vec<StoragePolicy>,
    /// Replacement policies.
    pub replace: Vec<ReplacePolicy>,
}

impl Default for SweepSpace {
    fn default() -> Self {
        Self {
            c: 15..=15,
            b: 6..=13,
            storage: StoragePolicy::ALL.to_vec(),
            replace: ReplacePolicy::ALL.to_vec(),
        }
    }
}

impl SweepSpace {
    /// Enumerates the configurations of the space.
    ///
    /// For each `(C, B)` the associativity exponent runs over `0 ≤ S < C - B` and the
    /// victim exponent over `0 ≤ V ≤ S`.
    pub fn configs(&self) -> Vec<CacheConfig> {
        let mut configs = Vec::new();
        for &storage_policy in &self.storage {
            for &replace_policy in &self.replace {
                for c in self.c.clone() {
                    for b in self.b.clone() {
                        let max_s = c.saturating_sub(b);
                        for s in 0..max_s {
                            for v in 0..=s.min(limits::MAX_VICTIM_BITS) {
                                configs.push(CacheConfig {
                                    c,
                                    b,
                                    s,
                                    v,
                                    storage_policy,
                                    replace_policy,
                                });
                            }
                        }
                    }
                }
            }
        }
        configs
    }
}

/// Result of one sweep configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Total size exponent.
    pub c: u32,
    /// Block size exponent.
    pub b: u32,
    /// Associativity exponent.
    pub s: u32,
    /// Victim size exponent.
    pub v: u32,
    /// Storage policy code (`B`/`S`).
    pub t: char,
    /// Replacement policy code (`L`/`N`).
    pub r: char,
    /// Average access time in cycles.
    pub aat: f64,
    /// Combined miss rate.
    pub miss_rate: f64,
    /// Data plus bookkeeping storage in bytes.
    pub total_size_bytes: u64,
}

/// Replays `events` through a fresh simulator for one configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `config` is invalid.
pub fn evaluate(config: &CacheConfig, events: &[TraceEvent]) -> Result<SweepPoint, ConfigError> {
    let mut sim = Simulator::setup(config)?;
    sim.replay(events);
    let geometry = *sim.geometry();
    let stats = sim.complete();
    Ok(SweepPoint {
        c: config.c,
        b: config.b,
        s: config.s,
        v: config.v,
        t: config.storage_policy.code(),
        r: config.replace_policy.code(),
        aat: stats.avg_access_time,
        miss_rate: stats.miss_rate,
        total_size_bytes: stats.total_size_bytes(&geometry),
    })
}

/// Evaluates every configuration of `space` against `events`, in enumeration order.
///
/// # Errors
///
/// Returns the first [`ConfigError`] met (only possible for spaces that exceed the
/// supported geometry limits).
pub fn run_sweep(space: &SweepSpace, events: &[TraceEvent]) -> Result<Vec<SweepPoint>, ConfigError> {
    let configs = space.configs();
    debug!(points = configs.len(), events = events.len(), "starting sweep");
    configs
        .iter()
        .map(|config| evaluate(config, events))
        .collect()
}

/// Returns the point with the lowest average access time.
///
/// Ties go to the smaller total size, then to the earlier point.
pub fn best_by_aat(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().reduce(|best, p| {
        let better = p.aat < best.aat
            || (p.aat.total_cmp(&best.aat).is_eq() && p.total_size_bytes < best.total_size_bytes);
        if better { p } else { best }
    })
}
