//! Cache Replacement Policies.
//!
//! Implements the algorithms that order the blocks of one set and pick the
//! block to evict when the set is full.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `NmruFifo`: First-In, First-Out, except the most recently used block is never chosen.
//!
//! Each policy owns the ordered tag sequence of its set. The set keeps the tag-to-block
//! map; the two always hold the same tags.

/// Least Recently Used replacement policy.
pub mod lru;

/// Not-most-recently-used FIFO replacement policy.
pub mod nmru_fifo;

use std::collections::VecDeque;

pub use lru::LruPolicy;
pub use nmru_fifo::NmruFifoPolicy;

use crate::config::ReplacePolicy as PolicyType;

/// Trait for set replacement policies.
///
/// Defines the interface for updating the recency/insertion order and selecting
/// the tag to evict.
pub trait ReplacementPolicy {
    /// Records a hit on `tag`, which must already be tracked.
    fn touch(&mut self, tag: u64);

    /// Starts tracking a freshly filled `tag`.
    fn insert(&mut self, tag: u64);

    /// Stops tracking `tag`. Returns `false` if it was not tracked.
    fn remove(&mut self, tag: u64) -> bool;

    /// Selects the tag to evict, or `None` when nothing is tracked.
    fn victim(&self) -> Option<u64>;

    /// Tracked tags, oldest (eviction end) first.
    fn order(&self) -> &VecDeque<u64>;
}

/// Replacement state of one set, dispatched statically on the configured policy.
#[derive(Debug, Clone)]
pub enum PolicyState {
    /// LRU ordering.
    Lru(LruPolicy),
    /// NMRU-FIFO ordering.
    NmruFifo(NmruFifoPolicy),
}

impl PolicyState {
    /// Creates empty replacement state for `policy`.
    pub fn new(policy: PolicyType) -> Self {
        match policy {
            PolicyType::Lru => Self::Lru(LruPolicy::new()),
            PolicyType::NmruFifo => Self::NmruFifo(NmruFifoPolicy::new()),
        }
    }
}

impl ReplacementPolicy for PolicyState {
    #[inline]
    fn touch(&mut self, tag: u64) {
        match self {
            Self::Lru(p) => p.touch(tag),
            Self::NmruFifo(p) => p.touch(tag),
        }
    }

    #[inline]
    fn insert(&mut self, tag: u64) {
        match self {
            Self::Lru(p) => p.insert(tag),
            Self::NmruFifo(p) => p.insert(tag),
        }
    }

    #[inline]
    fn remove(&mut self, tag: u64) -> bool {
        match self {
            Self::Lru(p) => p.remove(tag),
            Self::NmruFifo(p) => p.remove(tag),
        }
    }

    #[inline]
    fn victim(&self) -> Option<u64> {
        match self {
            Self::Lru(p) => p.victim(),
            Self::NmruFifo(p) => p.victim(),
        }
    }

    fn order(&self) -> &VecDeque<u64> {
        match self {
            Self::Lru(p) => p.order(),
            Self::NmruFifo(p) => p.order(),
        }
    }
}
