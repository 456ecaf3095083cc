//! # Address Decoding Tests
//!
//! Verifies the `{tag, index, offset}` split for several geometries, the
//! victim-cache flattening and the low-bit mask helper.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use vcsim_core::common::addr::{Address, low_mask};
use vcsim_core::config::{CacheConfig, ReplacePolicy, StoragePolicy};

use crate::common::{addr, config, geometry, small};

#[rstest]
#[case(0, 0)]
#[case(1, 0b1)]
#[case(12, 0xFFF)]
#[case(63, u64::MAX >> 1)]
#[case(64, u64::MAX)]
#[case(70, u64::MAX)]
fn low_mask_widths(#[case] bits: u32, #[case] expected: u64) {
    assert_eq!(low_mask(bits), expected);
}

/// Baseline geometry: offset 5 bits, index 7 bits, tag 52 bits.
#[test]
fn decode_baseline_fields() {
    let g = geometry(&CacheConfig::default());
    let raw = (0xABC << 12) | (0x15 << 5) | 0x3;

    let a = Address::decode(raw, &g);
    assert_eq!(a, Address::new(0xABC, 0x15, 0x3));
}

#[test]
fn decode_keeps_top_bits_in_tag() {
    let g = geometry(&CacheConfig::default());
    let a = Address::decode(u64::MAX, &g);

    assert_eq!(a.offset, 0x1F);
    assert_eq!(a.index, 0x7F);
    assert_eq!(a.tag, low_mask(52));
}

/// A fully-associative cache (C = B + S) has no index field.
#[test]
fn decode_fully_associative_has_zero_index() {
    let g = geometry(&config(
        10,
        4,
        6,
        0,
        StoragePolicy::Blocking,
        ReplacePolicy::Lru,
    ));
    assert_eq!(g.index_bits, 0);

    let a = Address::decode(0xDEAD_BEEF, &g);
    assert_eq!(a.index, 0);
    assert_eq!(a.offset, 0xF);
    assert_eq!(a.tag, 0xDEAD_BEEF >> 4);
}

#[test]
fn decode_small_geometry_matches_helper() {
    let g = geometry(&small(StoragePolicy::Blocking, ReplacePolicy::Lru));
    let a = Address::decode(addr(0x1234, 5, 9), &g);
    assert_eq!(a, Address::new(0x1234, 5, 9));
}

/// Flattening appends the index below the tag and clears the index.
#[test]
fn flatten_appends_index() {
    let g = geometry(&CacheConfig::default());
    let a = Address::new(0xABC, 0x15, 0x3);

    let flat = a.flatten(g.index_bits, g.victim_tag_mask());
    assert_eq!(flat, Address::new((0xABC << 7) | 0x15, 0, 0x3));
}

#[test]
fn flatten_separates_same_tag_in_different_sets() {
    let g = geometry(&CacheConfig::default());
    let mask = g.victim_tag_mask();

    let a = Address::new(7, 1, 0).flatten(g.index_bits, mask);
    let b = Address::new(7, 2, 0).flatten(g.index_bits, mask);
    assert_ne!(a.tag, b.tag);
}

proptest! {
    /// Decoding then recomposing yields the original address for any geometry.
    #[test]
    fn decode_compose_identity(raw in any::<u64>(), b in 1u32..=12, s in 0u32..=8, extra in 0u32..=16) {
        let c = b + s + extra;
        let g = geometry(&config(c, b, s, 0, StoragePolicy::Blocking, ReplacePolicy::Lru));
        let a = Address::decode(raw, &g);

        prop_assert!(a.offset < g.block_size());
        prop_assert!(a.index < g.num_sets());
        prop_assert_eq!(a.compose(&g), raw);
    }

    /// Distinct blocks always get distinct victim keys.
    #[test]
    fn flatten_is_injective_on_blocks(x in any::<u64>(), y in any::<u64>()) {
        let g = geometry(&CacheConfig::default());
        let (ax, ay) = (Address::decode(x, &g), Address::decode(y, &g));
        let mask = g.victim_tag_mask();
        let same_block = ax.tag == ay.tag && ax.index == ay.index;

        prop_assert_eq!(
            ax.flatten(g.index_bits, mask).tag == ay.flatten(g.index_bits, mask).tag,
            same_block
        );
    }
}
