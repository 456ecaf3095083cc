//! Trace-driven cache simulator library.
//!
//! This crate models a set-associative cache backed by a fully-associative victim
//! cache and replays memory traces against it:
//! 1. **Cache:** Address decoding, blocks with sub-block validity, LRU and NMRU-FIFO
//!    sets, the victim cache, and the hit / victim-hit / miss algorithm.
//! 2. **Statistics:** Miss counters, average access time and storage overhead.
//! 3. **Simulation:** The setup/access/complete facade, trace reader, and parameter sweep.
//!
//! ```
//! use vcsim_core::{CacheConfig, Operation, Simulator};
//!
//! let mut sim = Simulator::setup(&CacheConfig::default()).unwrap();
//! let _ = sim.access(Operation::Read, 0x1000);
//! let _ = sim.access(Operation::Read, 0x1000);
//! let stats = sim.complete();
//! assert_eq!(stats.accesses, 2);
//! assert_eq!(stats.misses, 1);
//! ```

/// Cache model (blocks, sets, policies, victim cache).
pub mod cache;
/// Common types (addresses, operations, errors).
pub mod common;
/// Cache configuration and derived geometry.
pub mod config;
/// Trace replay, simulator facade, and parameter sweep.
pub mod sim;
/// Statistics collection and derivation.
pub mod stats;

/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Read/write trace operation.
pub use crate::common::data::{AccessResult, Operation};
/// Top-level simulator; construct with `Simulator::setup`.
pub use crate::sim::Simulator;
/// Final statistics returned by `Simulator::complete`.
pub use crate::stats::CacheStats;
