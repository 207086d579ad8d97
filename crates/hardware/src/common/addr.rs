//! Block address type.
//!
//! An address seen by the cache is laid out as `tag | set index | byte offset`.
//! This module provides:
//! 1. **Type Safety:** [`BlockAddr`] marks an address rebuilt from a tag and a
//!    set index (byte offset zero), as used by the sequential predictor.
//! 2. **Address Manipulation:** Splitting a raw address into its set index and
//!    tag, and joining them back.
//!
//! Shifts saturate to zero instead of overflowing, so oversized bit widths
//! never panic.

/// A block-aligned address (byte offset bits are zero).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(pub u64);

impl BlockAddr {
    /// Creates a block address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Rebuilds the block address for `tag` in set `set_index`.
    ///
    /// # Arguments
    ///
    /// * `tag` - Tag stored in the line.
    /// * `set_index` - Index of the set holding the line.
    /// * `set_index_bits` - Width of the set index field.
    /// * `byte_offset_bits` - Width of the byte offset field.
    pub const fn from_parts(
        tag: u64,
        set_index: usize,
        set_index_bits: u32,
        byte_offset_bits: u32,
    ) -> Self {
        let tag_shift = set_index_bits.saturating_add(byte_offset_bits);
        Self(shl(tag, tag_shift) | shl(set_index as u64, byte_offset_bits))
    }

    /// Splits a raw address into `(set_index, tag)`.
    ///
    /// The byte offset is discarded.
    pub const fn split(addr: u64, set_index_bits: u32, byte_offset_bits: u32) -> (usize, u64) {
        let index_mask = shl(1, set_index_bits).wrapping_sub(1);
        let set_index = shr(addr, byte_offset_bits) & index_mask;
        let tag = shr(addr, set_index_bits.saturating_add(byte_offset_bits));
        (set_index as usize, tag)
    }
}

const fn shl(value: u64, bits: u32) -> u64 {
    match value.checked_shl(bits) {
        Some(v) => v,
        None => 0,
    }
}

const fn shr(value: u64, bits: u32) -> u64 {
    match value.checked_shr(bits) {
        Some(v) => v,
        None => 0,
    }
}
