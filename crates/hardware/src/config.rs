//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** The baseline geometry (32 KiB, 32-byte blocks, 8-way, 4 victim blocks).
//! 2. **Structures:** The raw [`CacheConfig`] and the validated, derived [`Geometry`].
//! 3. **Enums:** Storage (blocking/sub-blocking) and replacement (LRU/NMRU-FIFO) policies.
//!
//! Configuration is supplied via JSON, the command line, or `CacheConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::low_mask;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Total data storage is 2^15 bytes (32 KiB).
    pub const TOTAL_BITS: u32 = 15;

    /// Each block holds 2^5 bytes (32 bytes).
    pub const BLOCK_BITS: u32 = 5;

    /// Each set holds 2^3 blocks (8-way set-associative).
    pub const SET_BITS: u32 = 3;

    /// The victim cache holds 2^2 blocks.
    pub const VICTIM_BITS: u32 = 2;
}

/// Upper bounds on the geometry parameters.
pub mod limits {
    /// Largest total size exponent (1 TiB); keeps every derived bit count within `u64`.
    pub const MAX_TOTAL_BITS: u32 = 40;

    /// Largest victim size exponent.
    pub const MAX_VICTIM_BITS: u32 = 20;
}

/// Block storage granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum StoragePolicy {
    /// One valid bit covers the whole block.
    #[default]
    #[serde(alias = "B", alias = "blocking")]
    Blocking,
    /// The two halves of a block are filled and validated independently.
    #[serde(alias = "S", alias = "subblocking")]
    Subblocking,
}

impl StoragePolicy {
    /// Both policies, in command-line order.
    pub const ALL: [Self; 2] = [Self::Blocking, Self::Subblocking];

    /// Returns the single-letter command-line code.
    pub const fn code(self) -> char {
        match self {
            Self::Blocking => 'B',
            Self::Subblocking => 'S',
        }
    }

    /// Number of valid bits stored per block.
    pub const fn valid_bits(self) -> u64 {
        match self {
            Self::Blocking => 1,
            Self::Subblocking => 2,
        }
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocking => f.write_str("blocking"),
            Self::Subblocking => f.write_str("subblocking"),
        }
    }
}

impl FromStr for StoragePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "blocking" => Ok(Self::Blocking),
            "s" | "subblocking" => Ok(Self::Subblocking),
            _ => Err(ConfigError::UnknownStoragePolicy(s.to_owned())),
        }
    }
}

/// Replacement policy of the main-cache sets.
///
/// The victim cache is always LRU regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ReplacePolicy {
    /// Least Recently Used.
    #[default]
    #[serde(alias = "L", alias = "LRU", alias = "lru")]
    Lru,
    /// FIFO that never picks the most recently used block.
    #[serde(alias = "N", alias = "NMRU", alias = "NMRU-FIFO", alias = "nmru_fifo")]
    NmruFifo,
}

impl ReplacePolicy {
    /// Both policies, in command-line order.
    pub const ALL: [Self; 2] = [Self::Lru, Self::NmruFifo];

    /// Returns the single-letter command-line code.
    pub const fn code(self) -> char {
        match self {
            Self::Lru => 'L',
            Self::NmruFifo => 'N',
        }
    }

    /// Replacement controller bits stored per main-cache block.
    pub const fn controller_bits(self) -> u64 {
        match self {
            Self::Lru => 8,
            Self::NmruFifo => 4,
        }
    }
}

impl fmt::Display for ReplacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => f.write_str("LRU"),
            Self::NmruFifo => f.write_str("NMRU-FIFO"),
        }
    }
}

impl FromStr for ReplacePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "lru" => Ok(Self::Lru),
            "n" | "nmru" | "nmru-fifo" | "nmru_fifo" => Ok(Self::NmruFifo),
            _ => Err(ConfigError::UnknownReplacePolicy(s.to_owned())),
        }
    }
}

/// Raw cache parameters as supplied by the user.
///
/// All sizes are base-2 exponents. Use [`Geometry::new`] to validate them.
///
/// # Examples
///
/// ```
/// use vcsim_core::config::{CacheConfig, ReplacePolicy, StoragePolicy};
///
/// let config = CacheConfig::from_json(r#"{ "b": 6, "replace_policy": "N" }"#).unwrap();
/// assert_eq!(config.c, 15);
/// assert_eq!(config.b, 6);
/// assert_eq!(config.storage_policy, StoragePolicy::Blocking);
/// assert_eq!(config.replace_policy, ReplacePolicy::NmruFifo);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total data storage is 2^C bytes.
    #[serde(default = "CacheConfig::default_c")]
    pub c: u32,
    /// Block size is 2^B bytes.
    #[serde(default = "CacheConfig::default_b")]
    pub b: u32,
    /// Each set holds 2^S blocks.
    #[serde(default = "CacheConfig::default_s")]
    pub s: u32,
    /// The victim cache holds 2^V blocks.
    #[serde(default = "CacheConfig::default_v")]
    pub v: u32,
    /// Blocking or sub-blocking storage.
    #[serde(default)]
    pub storage_policy: StoragePolicy,
    /// Main-cache replacement policy.
    #[serde(default)]
    pub replace_policy: ReplacePolicy,
}

impl CacheConfig {
    const fn default_c() -> u32 {
        defaults::TOTAL_BITS
    }

    const fn default_b() -> u32 {
        defaults::BLOCK_BITS
    }

    const fn default_s() -> u32 {
        defaults::SET_BITS
    }

    const fn default_v() -> u32 {
        defaults::VICTIM_BITS
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the text is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the parameters and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// See [`Geometry::new`].
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            c: defaults::TOTAL_BITS,
            b: defaults::BLOCK_BITS,
            s: defaults::SET_BITS,
            v: defaults::VICTIM_BITS,
            storage_policy: StoragePolicy::default(),
            replace_policy: ReplacePolicy::default(),
        }
    }
}

/// Validated cache geometry and policies.
///
/// Built once at setup and immutable for the lifetime of a simulation. The field
/// widths follow `offset = B`, `index = C - B - S`, `tag = 64 - (C - S)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Total size exponent (C).
    pub total_bits: u32,
    /// Block size exponent (B).
    pub block_bits: u32,
    /// Associativity exponent (S).
    pub set_bits: u32,
    /// Victim size exponent (V).
    pub victim_bits: u32,
    /// Width of the offset field.
    pub offset_bits: u32,
    /// Width of the index field.
    pub index_bits: u32,
    /// Width of the tag field.
    pub tag_bits: u32,
    /// Blocking or sub-blocking storage.
    pub storage_policy: StoragePolicy,
    /// Main-cache replacement policy.
    pub replace_policy: ReplacePolicy,
}

impl Geometry {
    /// Validates `config` and derives the field widths.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::BlockBitsTooSmall`] if `B < 1`.
    /// * [`ConfigError::TotalBitsTooLarge`] if `C > 40`.
    /// * [`ConfigError::SetBitsTooLarge`] if `C < B + S`.
    /// * [`ConfigError::VictimBitsTooLarge`] if `V > 20`.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let CacheConfig { c, b, s, v, .. } = *config;
        if b < 1 {
            return Err(ConfigError::BlockBitsTooSmall(b));
        }
        if c > limits::MAX_TOTAL_BITS {
            return Err(ConfigError::TotalBitsTooLarge {
                got: c,
                max: limits::MAX_TOTAL_BITS,
            });
        }
        let index_bits = c
            .checked_sub(b)
            .and_then(|rest| rest.checked_sub(s))
            .ok_or(ConfigError::SetBitsTooLarge { c, b, s })?;
        if v > limits::MAX_VICTIM_BITS {
            return Err(ConfigError::VictimBitsTooLarge {
                got: v,
                max: limits::MAX_VICTIM_BITS,
            });
        }

        Ok(Self {
            total_bits: c,
            block_bits: b,
            set_bits: s,
            victim_bits: v,
            offset_bits: b,
            index_bits,
            tag_bits: u64::BITS - (c - s),
            storage_policy: config.storage_policy,
            replace_policy: config.replace_policy,
        })
    }

    /// Total data storage in bytes.
    pub const fn cache_size(&self) -> u64 {
        1 << self.total_bits
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u64 {
        1 << self.block_bits
    }

    /// Blocks per set.
    pub const fn associativity(&self) -> u64 {
        1 << self.set_bits
    }

    /// Number of main-cache sets.
    pub const fn num_sets(&self) -> u64 {
        1 << self.index_bits
    }

    /// Number of victim-cache blocks.
    pub const fn num_victim_blocks(&self) -> u64 {
        1 << self.victim_bits
    }

    /// Number of blocks in the main cache.
    pub const fn total_main_blocks(&self) -> u64 {
        1 << (self.total_bits - self.block_bits)
    }

    /// Width of the victim cache's key: the main tag widened by the index.
    pub const fn victim_tag_bits(&self) -> u32 {
        self.tag_bits + self.index_bits
    }

    /// Mask of the victim cache's key.
    pub const fn victim_tag_mask(&self) -> u64 {
        low_mask(self.victim_tag_bits())
    }

    /// Valid-mask bit of the block half that contains `offset`.
    ///
    /// Bit 0 is the lower half, bit 1 the upper half.
    pub const fn half_of(&self, offset: u64) -> u8 {
        if offset >= self.block_size() / 2 { 0b10 } else { 0b01 }
    }

    /// Valid-mask bits set by a fresh fill of the half containing `offset`.
    ///
    /// Under blocking storage the whole block is filled at once (bit 0).
    pub const fn fill_mask(&self, offset: u64) -> u8 {
        match self.storage_policy {
            StoragePolicy::Blocking => 0b01,
            StoragePolicy::Subblocking => self.half_of(offset),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C={} B={} S={} V={} ({} B cache, {} B blocks, {}-way, {} sets, {} victim blocks, {}, {})",
            self.total_bits,
            self.block_bits,
            self.set_bits,
            self.victim_bits,
            self.cache_size(),
            self.block_size(),
            self.associativity(),
            self.num_sets(),
            self.num_victim_blocks(),
            self.storage_policy,
            self.replace_policy
        )
    }
}
