//! Per-access events.
//!
//! The engine reports what it did during an access through an
//! [`AccessObserver`]. Events arrive in the order the engine performs them:
//! a hit reports `HitRead` or `HitWrite` (then `Writeback` if the written line
//! is written back), a miss reports any victim `Writeback` and `Eviction`,
//! then `MissLoad`, then `Writeback` if the loaded line is written back.

use std::fmt;

/// Kind of action taken by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessEvent {
    /// A read found its block in the cache.
    HitRead,
    /// A write found its block in the cache.
    HitWrite,
    /// A block was loaded from memory into a line.
    MissLoad,
    /// A dirty line was written to memory.
    Writeback,
    /// A valid line was invalidated to make room.
    Eviction,
}

impl AccessEvent {
    /// Compact trace glyph for the event.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::HitRead => "<-",
            Self::HitWrite => "->",
            Self::MissLoad => "<=",
            Self::Writeback => "=>",
            Self::Eviction => "xx",
        }
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Receiver of per-access events.
pub trait AccessObserver {
    /// Called once for each event, in order.
    fn on_event(&mut self, event: AccessEvent);
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl AccessObserver for NoopObserver {
    #[inline]
    fn on_event(&mut self, _event: AccessEvent) {}
}

/// Records events in arrival order.
impl AccessObserver for Vec<AccessEvent> {
    fn on_event(&mut self, event: AccessEvent) {
        self.push(event);
    }
}
