//! Random source for random replacement.
//!
//! Each cache owns its own source so that runs are reproducible per instance.
//! The default is a xorshift generator, avoiding the overhead of a general
//! purpose RNG.

use std::fmt;

/// Seed substituted for zero, which would lock xorshift at zero forever.
const FALLBACK_SEED: u64 = 123_456_789;

/// Source of random offsets for random replacement.
pub trait RandomSource: fmt::Debug + Send {
    /// Returns the next 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a value in `[0, bound)`, or 0 when `bound` is 0.
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as usize
    }
}

/// Xorshift64 generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from `seed`; a zero seed is replaced by a fixed constant.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
