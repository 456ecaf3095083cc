//! Simulator: owns the cache model and its statistics side-by-side.
//!
//! The driver calls [`Simulator::setup`] once, [`Simulator::access`] once per trace
//! event and [`Simulator::complete`] once at the end. `complete` consumes the
//! simulator, so no access can follow it.

use tracing::{debug, info};

use crate::cache::Cache;
use crate::common::data::{AccessResult, Operation};
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, Geometry};
use crate::sim::trace::TraceEvent;
use crate::stats::CacheStats;

/// Top-level simulator: cache state + accumulated statistics.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Main and victim cache.
    pub cache: Cache,
    stats: CacheStats,
}

impl Simulator {
    /// Validates `config` and builds an empty cache with zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn setup(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(config)?;
        debug!(%geometry, "cache setup");
        Ok(Self::with_geometry(geometry))
    }

    /// Builds an empty cache for an already validated geometry.
    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            cache: Cache::new(geometry),
            stats: CacheStats::default(),
        }
    }

    /// Geometry and policies of the simulated cache.
    pub const fn geometry(&self) -> &Geometry {
        self.cache.geometry()
    }

    /// Replays one trace event.
    pub fn access(&mut self, op: Operation, address: u64) -> AccessResult {
        self.cache.access(op, address, &mut self.stats)
    }

    /// Replays every event of `events` in order.
    pub fn replay<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a TraceEvent>,
    {
        for event in events {
            let _ = self.access(event.op, event.address);
        }
    }

    /// Counters accumulated so far (derived fields are not yet filled in).
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Finalizes and returns the statistics.
    pub fn complete(self) -> CacheStats {
        let mut stats = self.stats;
        stats.complete(self.cache.geometry());
        info!(
            accesses = stats.accesses,
            misses = stats.misses,
            victim_hits = stats.victim_hits,
            "simulation complete"
        );
        stats
    }
}
