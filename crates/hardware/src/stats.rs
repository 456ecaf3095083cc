//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of every replayed access and derives the final
//! metrics. It provides:
//! 1. **Counters:** Accesses, reads, writes and their misses, split into main-cache
//!    misses and combined (main + victim) misses.
//! 2. **Timing model:** Hit time, miss penalty and average access time.
//! 3. **Storage model:** Tag/valid/dirty/replacement bits spent on bookkeeping and
//!    their ratio to the data storage.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::common::data::{AccessResult, Operation};
use crate::config::{Geometry, StoragePolicy};

/// Dirty bits stored per block.
const DIRTY_BITS: u64 = 1;

/// LRU controller bits stored per victim-cache block.
const VICTIM_CONTROLLER_BITS: u64 = 8;

/// Fixed memory latency, in cycles, charged on every miss.
const MEMORY_LATENCY: f64 = 50.0;

/// Statistics for one simulation run.
///
/// The counters are updated by every access; the remaining fields are filled in by
/// [`CacheStats::complete`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Total trace events replayed.
    pub accesses: u64,
    /// Read events.
    pub reads: u64,
    /// Reads that missed in the main cache (including victim hits).
    pub read_misses: u64,
    /// Reads that missed in both the main and the victim cache.
    pub read_misses_combined: u64,
    /// Write events.
    pub writes: u64,
    /// Writes that missed in the main cache (including victim hits).
    pub write_misses: u64,
    /// Writes that missed in both the main and the victim cache.
    pub write_misses_combined: u64,

    /// Combined misses (`read_misses_combined + write_misses_combined`).
    pub misses: u64,
    /// Main-cache misses served by the victim cache.
    pub victim_hits: u64,
    /// Hit time in cycles.
    pub hit_time: u64,
    /// Miss penalty in cycles.
    pub miss_penalty: u64,
    /// `misses / accesses`.
    pub miss_rate: f64,
    /// Average access time in cycles.
    pub avg_access_time: f64,
    /// Bookkeeping bits across the main and victim caches.
    pub storage_overhead: u64,
    /// `storage_overhead` over the data storage in bits.
    pub storage_overhead_ratio: f64,
    /// Set by `complete` when no access was replayed; the ratios are then reported as 0.
    pub empty_trace: bool,
}

impl CacheStats {
    /// Accounts for one access.
    ///
    /// A victim hit counts as a main-cache miss but not as a combined miss.
    pub fn record(&mut self, op: Operation, result: AccessResult) {
        self.accesses += 1;
        let (total, misses, combined) = match op {
            Operation::Read => (
                &mut self.reads,
                &mut self.read_misses,
                &mut self.read_misses_combined,
            ),
            Operation::Write => (
                &mut self.writes,
                &mut self.write_misses,
                &mut self.write_misses_combined,
            ),
        };
        *total += 1;
        match result {
            AccessResult::Hit => {}
            AccessResult::HitVictim => *misses += 1,
            AccessResult::Miss => {
                *misses += 1;
                *combined += 1;
            }
        }
    }

    /// Number of main-cache misses served by the victim cache.
    pub const fn victim_hits(&self) -> u64 {
        (self.read_misses - self.read_misses_combined)
            + (self.write_misses - self.write_misses_combined)
    }

    /// Derives the final metrics from the counters.
    ///
    /// An empty trace sets [`CacheStats::empty_trace`] and reports a miss rate and
    /// average access time of zero instead of dividing by zero.
    pub fn complete(&mut self, geometry: &Geometry) {
        self.misses = self.read_misses_combined + self.write_misses_combined;
        self.victim_hits = self.victim_hits();
        self.hit_time = hit_time(geometry);
        self.miss_penalty = miss_penalty(geometry);
        self.storage_overhead = storage_overhead(geometry);
        self.storage_overhead_ratio =
            self.storage_overhead as f64 / data_storage_bits(geometry) as f64;

        if self.accesses == 0 {
            warn!("no accesses replayed; miss rate and access time reported as 0");
            self.empty_trace = true;
            self.miss_rate = 0.0;
            self.avg_access_time = 0.0;
            return;
        }

        let hits = self.accesses - self.misses;
        let total_time =
            self.hit_time * hits + (self.miss_penalty + self.hit_time) * self.misses;
        self.miss_rate = self.misses as f64 / self.accesses as f64;
        self.avg_access_time = total_time as f64 / self.accesses as f64;
    }

    /// Total bytes of data plus bookkeeping storage.
    pub fn total_size_bytes(&self, geometry: &Geometry) -> u64 {
        (data_storage_bits(geometry) + self.storage_overhead).div_ceil(8)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

/// Hit time in cycles: `ceil(0.2 × associativity)`.
pub fn hit_time(geometry: &Geometry) -> u64 {
    (0.2 * geometry.associativity() as f64).ceil() as u64
}

/// Miss penalty in cycles.
///
/// `ceil(0.2 × associativity + 50 + 0.25 × transfer)`, where the transfer is a whole
/// block under blocking storage and half a block under sub-blocking storage.
pub fn miss_penalty(geometry: &Geometry) -> u64 {
    let transfer = match geometry.storage_policy {
        StoragePolicy::Blocking => geometry.block_size() as f64,
        StoragePolicy::Subblocking => geometry.block_size() as f64 / 2.0,
    };
    0.25f64
        .mul_add(transfer, 0.2f64.mul_add(geometry.associativity() as f64, MEMORY_LATENCY))
        .ceil() as u64
}

/// Bookkeeping bits of the main and victim caches.
pub fn storage_overhead(geometry: &Geometry) -> u64 {
    let valid_bits = geometry.storage_policy.valid_bits();
    let tag_bits = geometry.tag_bits as u64;
    let main_block_bits =
        DIRTY_BITS + valid_bits + tag_bits + geometry.replace_policy.controller_bits();
    let victim_block_bits =
        DIRTY_BITS + valid_bits + tag_bits + geometry.index_bits as u64 + VICTIM_CONTROLLER_BITS;
    geometry.total_main_blocks() * main_block_bits
        + geometry.num_victim_blocks() * victim_block_bits
}

/// Data bits held by the main and victim caches.
pub fn data_storage_bits(geometry: &Geometry) -> u64 {
    (geometry.total_main_blocks() + geometry.num_victim_blocks()) * geometry.block_size() * 8
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Statistics")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "Accesses: {}", self.accesses)?;
        writeln!(f, "Reads: {}", self.reads)?;
        writeln!(f, "Read misses: {}", self.read_misses)?;
        writeln!(f, "Read misses combined: {}", self.read_misses_combined)?;
        writeln!(f, "Writes: {}", self.writes)?;
        writeln!(f, "Write misses: {}", self.write_misses)?;
        writeln!(f, "Write misses combined: {}", self.write_misses_combined)?;
        writeln!(f, "Misses: {}", self.misses)?;
        writeln!(f, "Hit Time: {}", self.hit_time)?;
        writeln!(f, "Miss Penalty: {}", self.miss_penalty)?;
        writeln!(f, "Miss rate: {:.6}", self.miss_rate)?;
        writeln!(f, "Average access time (AAT): {:.6}", self.avg_access_time)?;
        writeln!(f, "Storage Overhead: {}", self.storage_overhead)?;
        write!(f, "Storage Overhead Ratio: {:.6}", self.storage_overhead_ratio)?;
        if self.empty_trace {
            write!(f, "\n(empty trace: ratios are undefined and reported as 0)")?;
        }
        Ok(())
    }
}
