//! Cache line metadata and per-set storage.
//!
//! A set is an ordered ring of exactly `associativity` lines. The front of the
//! ring is the next eviction candidate; moving the front line to the back marks
//! it most recently used. The ring is a fixed array plus a head index, so
//! front access and move-to-back are both O(1).
//!
//! # Performance
//!
//! - `front()` / `rotate()`: O(1)
//! - `find_mut()` / `is_full()`: O(W) where W is the associativity

/// Metadata for one cache line; no data bytes are modelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) valid: bool,
    pub(crate) dirty: bool,
    pub(crate) tag: u64,
}

impl CacheLine {
    /// Whether the line holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the line has been written since it was loaded.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the block last loaded into the line.
    ///
    /// Meaningful only while the line is valid.
    #[inline]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Returns true if the line is valid and holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// One set: a fixed ring of lines ordered front (next victim) to back (MRU).
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
    head: usize,
}

impl CacheSet {
    /// Creates a set of `associativity` invalid lines.
    pub(crate) fn new(associativity: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); associativity.max(1)].into_boxed_slice(),
            head: 0,
        }
    }

    /// Number of lines in the set.
    #[inline]
    pub fn associativity(&self) -> usize {
        self.lines.len()
    }

    /// Lines in order, front first.
    pub fn lines(&self) -> impl Iterator<Item = &CacheLine> + '_ {
        let (back, front) = self.lines.split_at(self.head);
        front.iter().chain(back.iter())
    }

    /// The line at the front of the order.
    #[inline]
    pub fn front(&self) -> &CacheLine {
        &self.lines[self.head]
    }

    #[inline]
    pub(crate) fn front_mut(&mut self) -> &mut CacheLine {
        &mut self.lines[self.head]
    }

    /// True when every line is valid.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|line| line.valid)
    }

    /// Returns the valid line holding `tag`, scanning front to back.
    pub(crate) fn find_mut(&mut self, tag: u64) -> Option<&mut CacheLine> {
        let (back, front) = self.lines.split_at_mut(self.head);
        front
            .iter_mut()
            .chain(back.iter_mut())
            .find(|line| line.matches(tag))
    }

    /// Moves the front line to the back.
    #[inline]
    pub(crate) fn rotate(&mut self) {
        self.head = (self.head + 1) % self.lines.len();
    }

    /// Moves the front line to the back `count` times.
    #[inline]
    pub(crate) fn rotate_by(&mut self, count: usize) {
        self.head = (self.head + count % self.lines.len()) % self.lines.len();
    }

    /// Rotates valid lines from front to back, at most once around the ring,
    /// stopping at the first invalid line.
    pub(crate) fn skip_valid(&mut self) {
        for _ in 0..self.lines.len() {
            if !self.front().valid {
                break;
            }
            self.rotate();
        }
    }
}
