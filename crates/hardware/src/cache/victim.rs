//! Victim cache.
//!
//! A small fully-associative buffer that receives every block evicted from the
//! main cache. It reuses [`CacheSet`] with a fixed blocking LRU policy; addresses are
//! flattened before every operation so that one pool can hold blocks from all
//! main-cache sets without tag collisions.

use super::block::Block;
use super::set::{CacheSet, Eviction};
use crate::common::addr::Address;
use crate::config::{Geometry, ReplacePolicy, StoragePolicy};

/// Fully-associative blocking LRU victim cache keyed by flattened addresses.
#[derive(Debug, Clone)]
pub struct VictimCache {
    set: CacheSet,
    index_bits: u32,
    tag_mask: u64,
}

impl VictimCache {
    /// Creates an empty victim cache of `2^V` blocks for `geometry`.
    ///
    /// The policy is fixed to blocking LRU: a held tag hits whatever halves were
    /// valid when it left the main cache.
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            set: CacheSet::new(
                geometry.num_victim_blocks() as usize,
                0,
                geometry.block_size(),
                StoragePolicy::Blocking,
                ReplacePolicy::Lru,
            ),
            index_bits: geometry.index_bits,
            tag_mask: geometry.victim_tag_mask(),
        }
    }

    /// Converts a main-cache address to this cache's key space.
    #[inline]
    pub const fn flatten(&self, address: &Address) -> Address {
        address.flatten(self.index_bits, self.tag_mask)
    }

    /// Looks up `address`, refreshing its recency on a hit.
    pub fn access(&mut self, address: &Address) -> bool {
        let flat = self.flatten(address);
        self.set.access(&flat)
    }

    /// Returns the block held for `address` without side effects.
    pub fn fetch(&self, address: &Address) -> Option<Block> {
        self.set.fetch(&self.flatten(address))
    }

    /// Stores a block evicted from the main cache at `address`.
    ///
    /// # Returns
    ///
    /// The block pushed out of the victim cache, if it was full. Its address is in
    /// flattened form.
    pub fn add(&mut self, address: &Address, block: Option<Block>) -> Option<Eviction> {
        let flat = self.flatten(address);
        self.set.add(&flat, block)
    }

    /// Drops the block held for `address`.
    ///
    /// # Returns
    ///
    /// The flattened tag that was removed, or `None` if it was not held.
    pub fn remove(&mut self, address: &Address) -> Option<u64> {
        let flat = self.flatten(address);
        self.set.remove(flat.tag)
    }

    /// Returns `true` if a block is held for `address`, whatever its validity.
    pub fn contains(&self, address: &Address) -> bool {
        self.set.contains(self.flatten(address).tag)
    }

    /// Number of blocks held.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if no block is held.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Maximum number of blocks.
    pub const fn capacity(&self) -> usize {
        self.set.capacity()
    }

    /// Underlying set, for inspecting the LRU order.
    pub const fn set(&self) -> &CacheSet {
        &self.set
    }
}
