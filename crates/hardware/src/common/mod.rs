//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the small building blocks shared by every component:
//! 1. **Address Types:** Decoded `{tag, index, offset}` views of raw addresses.
//! 2. **Access Types:** Trace operations and per-access outcomes.
//! 3. **Error Handling:** Configuration and trace error enums.

/// Address decomposition and victim-cache flattening.
pub mod addr;

/// Trace operation and access outcome types.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{Address, low_mask};
pub use data::{AccessResult, Operation};
pub use error::{ConfigError, TraceError, UnknownOperation};
