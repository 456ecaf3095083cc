//! # Block Validity Tests

use vcsim_core::cache::Block;

#[test]
fn new_block_has_given_mask() {
    let block = Block::new(0x42, Block::LOWER_HALF);
    assert_eq!(block.tag, 0x42);
    assert!(block.is_valid(Block::LOWER_HALF));
    assert!(!block.is_valid(Block::UPPER_HALF));
    assert!(!block.is_valid(Block::BOTH_HALVES));
}

#[test]
fn merge_accumulates_halves() {
    let mut block = Block::new(1, Block::UPPER_HALF);
    block.merge(Block::LOWER_HALF);
    assert_eq!(block.valid, Block::BOTH_HALVES);

    block.merge(Block::LOWER_HALF);
    assert_eq!(block.valid, Block::BOTH_HALVES);
}
