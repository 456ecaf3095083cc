//! Address decomposition.
//!
//! This module splits raw 64-bit trace addresses into the fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Decoding:** `{tag, index, offset}` extraction for a given [`Geometry`].
//! 2. **Flattening:** The victim-cache key that folds the set index into the tag.
//! 3. **Recomposition:** Rebuilding a raw address from its fields.

use crate::config::Geometry;

/// Returns a mask of the `bits` low-order bits.
///
/// A width of 64 or more yields all ones; a width of 0 yields zero.
#[inline]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Decoded view of a 64-bit address.
///
/// Decoding is a pure function of the raw value and the geometry; the same input
/// always yields the same fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Address {
    /// Per-set block identifier.
    pub tag: u64,
    /// Set selector.
    pub index: u64,
    /// Byte position within the block.
    pub offset: u64,
}

impl Address {
    /// Creates an address from already-decoded fields.
    pub const fn new(tag: u64, index: u64, offset: u64) -> Self {
        Self { tag, index, offset }
    }

    /// Splits `raw` into tag, index and offset fields.
    ///
    /// # Arguments
    ///
    /// * `raw` - Any 64-bit address.
    /// * `geometry` - Bit widths of the three fields.
    #[inline]
    pub const fn decode(raw: u64, geometry: &Geometry) -> Self {
        let offset = raw & low_mask(geometry.offset_bits);
        let index = (raw >> geometry.offset_bits) & low_mask(geometry.index_bits);
        let tag_shift = geometry.index_bits + geometry.offset_bits;
        let tag = if tag_shift >= u64::BITS {
            0
        } else {
            (raw >> tag_shift) & low_mask(geometry.tag_bits)
        };
        Self { tag, index, offset }
    }

    /// Reassembles the raw address these fields were decoded from.
    pub const fn compose(&self, geometry: &Geometry) -> u64 {
        let tag_shift = geometry.index_bits + geometry.offset_bits;
        let high = if tag_shift >= u64::BITS {
            0
        } else {
            self.tag << tag_shift
        };
        high | (self.index << geometry.offset_bits) | self.offset
    }

    /// Returns the fully-associative form of this address.
    ///
    /// The set index is appended below the tag so blocks from different sets
    /// never share a key; the result carries no index.
    ///
    /// # Arguments
    ///
    /// * `index_bits` - Width of the main cache's index field.
    /// * `tag_mask` - Mask of the widened (tag + index) key.
    #[inline]
    pub const fn flatten(&self, index_bits: u32, tag_mask: u64) -> Self {
        let tag = if index_bits >= u64::BITS {
            self.index
        } else {
            (self.tag << index_bits) | self.index
        };
        Self {
            tag: tag & tag_mask,
            index: 0,
            offset: self.offset,
        }
    }
}
