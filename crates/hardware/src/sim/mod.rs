//! Simulation driver layer.
//!
//! Provides the `setup`/`access`/`complete` facade over the cache model, the
//! trace reader that feeds it, and the design-space sweep built on both.

/// Setup/access/complete facade.
pub mod simulator;

/// Design-space exploration over cache parameters.
pub mod sweep;

/// Trace file parsing.
pub mod trace;

pub use simulator::Simulator;
pub use trace::TraceEvent;
