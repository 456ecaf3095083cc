//! Unit tests for the simulation drivers.

/// Setup / access / complete facade.
pub mod simulator;


/// Design-space sweep.
pub mod sweep;
