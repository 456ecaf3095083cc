//! Memory Access Types.
//!
//! This module defines the classification of trace events replayed by the simulator.
//! These types are used for the following:
//! 1. **Trace Ingestion:** Mapping the `r`/`w` operation codes of a trace line.
//! 2. **Statistics Tracking:** Routing hit/miss accounting to the read or write counters.
//! 3. **Outcome Reporting:** Telling the driver whether an access hit, hit in the victim
//!    cache, or went to memory.

use std::fmt;
use std::str::FromStr;

use super::error::UnknownOperation;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data read access (load).
    Read,

    /// Data write access (store).
    Write,
}

impl Operation {
    /// Returns the single-letter trace code (`r` or `w`).
    pub const fn code(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }

    /// Parses a single-letter trace code, accepting either case.
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'r' | 'R' => Some(Self::Read),
            'w' | 'W' => Some(Self::Write),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => match s.to_ascii_lowercase().as_str() {
                "read" => Some(Self::Read),
                "write" => Some(Self::Write),
                _ => None,
            },
        };
        op.ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}

/// Outcome of a single cache access.
///
/// Only the driver consumes this value; the cache keeps no per-access state beyond
/// the statistics counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessResult {
    /// The block was resident in its main-cache set.
    Hit,

    /// The block missed in the main cache but was found in the victim cache and
    /// swapped back into its set.
    HitVictim,

    /// The block missed in both levels (including partial sub-block fills).
    Miss,
}

impl AccessResult {
    /// Returns `true` for anything other than a main-cache hit.
    pub const fn is_main_miss(self) -> bool {
        !matches!(self, Self::Hit)
    }
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => f.write_str("HIT"),
            Self::HitVictim => f.write_str("HIT_VC"),
            Self::Miss => f.write_str("MISS"),
        }
    }
}
