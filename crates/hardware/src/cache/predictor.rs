//! Sequential access predictor.
//!
//! Remembers the block address of the previous access. An access whose block
//! address plus one block size equals the remembered address is treated as
//! prefetched, and its memory accesses are charged a flat
//! [`PREFETCH_CYCLES`] instead of the full memory latency.
//!
//! The comparison matches an access one block *below* the previous one, so
//! it credits descending block sequences.

use crate::common::BlockAddr;

/// Memory latency charged for a prefetched access.
pub const PREFETCH_CYCLES: u64 = 1;

/// Single-address sequential predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequentialPredictor {
    last: BlockAddr,
}

impl SequentialPredictor {
    /// Creates a predictor remembering address zero.
    pub const fn new() -> Self {
        Self {
            last: BlockAddr(0),
        }
    }

    /// Records an access and reports whether it was prefetched.
    ///
    /// The remembered address is overwritten with `addr` on every call.
    ///
    /// # Arguments
    ///
    /// * `addr` - Block address of the current access.
    /// * `block_size` - Block size in bytes.
    pub const fn observe(&mut self, addr: BlockAddr, block_size: u64) -> bool {
        let prefetched = addr.val().wrapping_add(block_size) == self.last.val();
        self.last = addr;
        prefetched
    }

    /// Block address of the most recent access.
    pub const fn last(&self) -> BlockAddr {
        self.last
    }
}
