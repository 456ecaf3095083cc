//! Associative cache set.
//!
//! A set holds up to `capacity` blocks keyed by tag, plus the replacement state
//! that orders them. It is the building block of both the main cache (one set per
//! index, capacity = associativity) and the victim cache (a single set,
//! capacity = victim size).

use std::collections::HashMap;
use std::collections::VecDeque;

use super::block::Block;
use super::policies::{PolicyState, ReplacementPolicy};
use crate::common::addr::Address;
use crate::config::{ReplacePolicy, StoragePolicy};

/// A block pushed out of a set, with the address it was stored under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Tag and set index of the evicted block (offset is zero).
    pub address: Address,
    /// The evicted block, including its valid mask.
    pub block: Block,
}

/// Fixed-capacity associative container of blocks.
///
/// Invariants: the map and the policy's order track exactly the same tags, and
/// the number of blocks never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct CacheSet {
    capacity: usize,
    index: u64,
    half_size: u64,
    storage: StoragePolicy,
    blocks: HashMap<u64, Block>,
    policy: PolicyState,
}

impl CacheSet {
    /// Creates an empty set.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of resident blocks (at least 1).
    /// * `index` - Set index reported in evictions.
    /// * `block_size` - Block size in bytes, used to locate sub-block halves.
    /// * `storage` - Blocking or sub-blocking validity.
    /// * `replace` - Replacement policy.
    pub fn new(
        capacity: usize,
        index: u64,
        block_size: u64,
        storage: StoragePolicy,
        replace: ReplacePolicy,
    ) -> Self {
        Self {
            capacity: capacity.max(1),
            index,
            half_size: block_size / 2,
            storage,
            blocks: HashMap::new(),
            policy: PolicyState::new(replace),
        }
    }

    /// Maximum number of resident blocks.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of this set in the main cache.
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Number of resident blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no block is resident.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns `true` once the set holds `capacity` blocks.
    pub fn is_full(&self) -> bool {
        self.blocks.len() >= self.capacity
    }

    /// Returns `true` if a block with `tag` is resident, whatever its validity.
    pub fn contains(&self, tag: u64) -> bool {
        self.blocks.contains_key(&tag)
    }

    /// Resident tags, eviction end first.
    pub fn order(&self) -> &VecDeque<u64> {
        self.policy.order()
    }

    /// Replacement state, for inspecting the MRU marker.
    pub const fn policy(&self) -> &PolicyState {
        &self.policy
    }

    /// Valid-mask bit that `address` needs.
    fn half(&self, address: &Address) -> u8 {
        match self.storage {
            StoragePolicy::Blocking => Block::LOWER_HALF,
            StoragePolicy::Subblocking if address.offset >= self.half_size => Block::UPPER_HALF,
            StoragePolicy::Subblocking => Block::LOWER_HALF,
        }
    }

    /// Looks up `address` and updates recency on a hit.
    ///
    /// A resident tag whose addressed half is invalid is a miss and leaves the
    /// replacement state untouched.
    pub fn access(&mut self, address: &Address) -> bool {
        let hit = match self.blocks.get(&address.tag) {
            Some(block) => match self.storage {
                StoragePolicy::Blocking => true,
                StoragePolicy::Subblocking => block.is_valid(self.half(address)),
            },
            None => false,
        };
        if hit {
            self.policy.touch(address.tag);
        }
        hit
    }

    /// Returns the block stored under `address.tag` without side effects.
    pub fn fetch(&self, address: &Address) -> Option<Block> {
        self.blocks.get(&address.tag).copied()
    }

    /// Stores a block for `address`.
    ///
    /// If the tag is already resident, the addressed half (and the valid bits of
    /// `block`, if given) are merged into it and its recency is refreshed; nothing
    /// is evicted. Otherwise a full set first evicts one block, then the new block
    /// is inserted at the MRU/insertion end with the valid mask of `block`, or with
    /// only the addressed half valid.
    ///
    /// # Returns
    ///
    /// The evicted block, or `None` if nothing was evicted.
    pub fn add(&mut self, address: &Address, block: Option<Block>) -> Option<Eviction> {
        let half = self.half(address);
        if let Some(existing) = self.blocks.get_mut(&address.tag) {
            existing.merge(half | block.map_or(0, |b| b.valid));
            self.policy.touch(address.tag);
            return None;
        }

        let evicted = if self.is_full() { self.evict() } else { None };
        let valid = block.map_or(half, |b| b.valid);
        let _ = self
            .blocks
            .insert(address.tag, Block::new(address.tag, valid));
        self.policy.insert(address.tag);
        evicted
    }

    /// Removes the block stored under `tag`.
    ///
    /// # Returns
    ///
    /// The removed tag, or `None` if it was not resident.
    pub fn remove(&mut self, tag: u64) -> Option<u64> {
        let _ = self.blocks.remove(&tag)?;
        let _ = self.policy.remove(tag);
        Some(tag)
    }

    /// Removes the block the replacement policy selects.
    ///
    /// # Returns
    ///
    /// The evicted block and its address, or `None` for an empty set.
    pub fn evict(&mut self) -> Option<Eviction> {
        let tag = self.policy.victim()?;
        let _ = self.policy.remove(tag);
        let block = self.blocks.remove(&tag)?;
        Some(Eviction {
            address: Address::new(tag, self.index, 0),
            block,
        })
    }
}
