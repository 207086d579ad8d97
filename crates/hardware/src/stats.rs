//! Access statistics.
//!
//! [`AccessResponse`] accumulates the outcome of cache accesses:
//! 1. **Outcome:** Hit and miss counts.
//! 2. **Replacement:** Evictions and dirty evictions.
//! 3. **Timing:** Total cycles charged.
//!
//! The caller owns the response. The engine only ever increments its fields,
//! so one response may span a whole session, or a fresh one may be used per
//! access and merged with `+=`.

use std::ops::AddAssign;

use serde::Serialize;

/// Accumulated statistics for one or more accesses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccessResponse {
    /// Accesses that found their block in the cache.
    pub hits: u64,
    /// Accesses that had to load their block.
    pub misses: u64,
    /// Valid lines invalidated to make room for a load.
    pub evictions: u64,
    /// Evictions that wrote a dirty line back to memory.
    pub dirty_evictions: u64,
    /// Total cycles charged.
    pub cycles: u64,
}

impl AccessResponse {
    /// Creates an all-zero response.
    pub const fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            evictions: 0,
            dirty_evictions: 0,
            cycles: 0,
        }
    }

    /// Total accesses recorded (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 with no accesses.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    /// Fraction of accesses that missed, or 0.0 with no accesses.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.misses as f64 / n as f64,
        }
    }

    /// Mean cycles per access, or 0.0 with no accesses.
    pub fn average_cycles(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.cycles as f64 / n as f64,
        }
    }
}

impl AddAssign for AccessResponse {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.misses += rhs.misses;
        self.evictions += rhs.evictions;
        self.dirty_evictions += rhs.dirty_evictions;
        self.cycles += rhs.cycles;
    }
}
