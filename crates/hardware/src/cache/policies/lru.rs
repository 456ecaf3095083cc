//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest time.
//! It keeps the set's tags in a recency queue: a hit or fill moves the tag to the
//! back (most recently used), and the front is the eviction candidate.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(W) where W is the number of resident blocks
//!   - `victim()`: O(1)
//! - **Hardware Cost:** High - modeled as 8 controller bits per block

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone, Default)]
pub struct LruPolicy {
    /// Front is LRU, back is MRU.
    order: VecDeque<u64>,
}

impl LruPolicy {
    /// Creates an empty LRU policy.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, tag: u64) -> Option<usize> {
        self.order.iter().position(|&t| t == tag)
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves `tag` to the MRU end.
    fn touch(&mut self, tag: u64) {
        if self.order.back() == Some(&tag) {
            return;
        }
        if let Some(pos) = self.position(tag) {
            let _ = self.order.remove(pos);
        }
        self.order.push_back(tag);
    }

    fn insert(&mut self, tag: u64) {
        self.touch(tag);
    }

    fn remove(&mut self, tag: u64) -> bool {
        self.position(tag)
            .and_then(|pos| self.order.remove(pos))
            .is_some()
    }

    /// Returns the tag at the LRU end.
    fn victim(&self) -> Option<u64> {
        self.order.front().copied()
    }

    fn order(&self) -> &VecDeque<u64> {
        &self.order
    }
}
