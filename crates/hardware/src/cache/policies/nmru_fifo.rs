//! Not-Most-Recently-Used FIFO (NMRU-FIFO) Replacement Policy.
//!
//! Blocks leave the set in insertion order, with one exception: the block
//! referenced most recently is never the one chosen. Hits do not reorder the
//! queue; they only move the MRU marker. When the oldest block carries the
//! marker, the second oldest is evicted instead.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(1)
//! - **Hardware Cost:** Low - modeled as 4 controller bits per block

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// NMRU-FIFO Policy state.
#[derive(Debug, Clone, Default)]
pub struct NmruFifoPolicy {
    /// Front is the oldest insertion.
    order: VecDeque<u64>,
    /// Most recently hit or filled tag.
    mru: Option<u64>,
}

impl NmruFifoPolicy {
    /// Creates an empty NMRU-FIFO policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently used tag, if it is still resident.
    pub const fn mru(&self) -> Option<u64> {
        self.mru
    }
}

impl ReplacementPolicy for NmruFifoPolicy {
    /// Marks `tag` most recently used without touching the FIFO order.
    fn touch(&mut self, tag: u64) {
        self.mru = Some(tag);
    }

    fn insert(&mut self, tag: u64) {
        self.order.push_back(tag);
        self.mru = Some(tag);
    }

    fn remove(&mut self, tag: u64) -> bool {
        let Some(pos) = self.order.iter().position(|&t| t == tag) else {
            return false;
        };
        let _ = self.order.remove(pos);
        if self.mru == Some(tag) {
            self.mru = None;
        }
        true
    }

    /// Returns the FIFO head, or the second oldest tag when the head is the MRU.
    ///
    /// A single resident block is always its own victim.
    fn victim(&self) -> Option<u64> {
        let head = *self.order.front()?;
        if self.mru == Some(head) {
            self.order.get(1).copied().or(Some(head))
        } else {
            Some(head)
        }
    }

    fn order(&self) -> &VecDeque<u64> {
        &self.order
    }
}
