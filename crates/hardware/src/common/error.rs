//! Error definitions.
//!
//! This module defines the failure modes of the simulator's public surface:
//! 1. **Configuration errors:** Geometry that cannot describe a cache, reported by `setup`.
//! 2. **Trace errors:** I/O failures and malformed lines met while reading a trace.
//!
//! Lookups that find nothing (`remove` of an absent tag, an empty eviction) are
//! ordinary `None` results, not errors.

use thiserror::Error;

/// Invalid cache configuration. Fatal to the run: no simulation is possible.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Blocks must hold at least two bytes so that sub-blocking has two halves.
    #[error("block bits must be at least 1 (got B={0})")]
    BlockBitsTooSmall(u32),

    /// The index field would have a negative width (`C < B + S`).
    #[error("cache of 2^{c} bytes cannot hold 2^{s} blocks of 2^{b} bytes per set (C < B + S)")]
    SetBitsTooLarge {
        /// Total size bits.
        c: u32,
        /// Block size bits.
        b: u32,
        /// Associativity bits.
        s: u32,
    },

    /// The cache is larger than the simulator supports.
    #[error("total size bits must be at most {max} (got C={got})")]
    TotalBitsTooLarge {
        /// Requested total size bits.
        got: u32,
        /// Largest supported value.
        max: u32,
    },

    /// The victim cache is larger than the simulator supports.
    #[error("victim bits must be at most {max} (got V={got})")]
    VictimBitsTooLarge {
        /// Requested victim size bits.
        got: u32,
        /// Largest supported value.
        max: u32,
    },

    /// Storage policy code other than `B` or `S`.
    #[error("unknown storage policy '{0}' (expected B or S)")]
    UnknownStoragePolicy(String),

    /// Replacement policy code other than `L` or `N`.
    #[error("unknown replacement policy '{0}' (expected L or N)")]
    UnknownReplacePolicy(String),

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operation code other than `r`/`w` (or `read`/`write`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}' (expected r or w)")]
pub struct UnknownOperation(pub String);

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not have the `<op> <address>` shape.
    #[error("line {line}: expected '<r|w> <hex address>', got '{text}'")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Offending line, trimmed.
        text: String,
    },

    /// The operation field was neither `r` nor `w`.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// Offending operation field.
        op: String,
    },

    /// The address field was not a 64-bit hexadecimal number.
    #[error("line {line}: bad address '{text}'")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// Offending address field.
        text: String,
    },
}
