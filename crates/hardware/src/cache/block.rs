//! Cache block entry.

/// One resident cache line: its tag and a per-half valid mask.
///
/// Under blocking storage only bit 0 is meaningful and covers the whole block.
/// Under sub-blocking storage bit 0 marks the lower half valid and bit 1 the upper half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Tag under which the block is stored (a flattened tag inside the victim cache).
    pub tag: u64,
    /// Valid mask.
    pub valid: u8,
}

impl Block {
    /// Lower half (or whole block under blocking storage).
    pub const LOWER_HALF: u8 = 0b01;
    /// Upper half.
    pub const UPPER_HALF: u8 = 0b10;
    /// Both halves.
    pub const BOTH_HALVES: u8 = 0b11;

    /// Creates a block with the given valid mask.
    pub const fn new(tag: u64, valid: u8) -> Self {
        Self { tag, valid }
    }

    /// Returns `true` if every bit of `half` is valid.
    #[inline]
    pub const fn is_valid(&self, half: u8) -> bool {
        self.valid & half == half
    }

    /// Marks the bits of `mask` valid.
    #[inline]
    pub const fn merge(&mut self, mask: u8) {
        self.valid |= mask;
    }
}
