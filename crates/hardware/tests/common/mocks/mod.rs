//! Test doubles for the engine's seams.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cachesim_core::cache::event::{AccessEvent, AccessObserver};
use cachesim_core::cache::random::RandomSource;
use mockall::mock;

mock! {
    /// Observer with scripted expectations.
    pub Observer {}

    impl AccessObserver for Observer {
        fn on_event(&mut self, event: AccessEvent);
    }
}

/// Random source that always returns the same value and counts draws.
#[derive(Debug, Clone)]
pub struct FixedSource {
    value: u64,
    draws: Arc<AtomicUsize>,
}

impl FixedSource {
    /// Creates a source returning `value` on every draw.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            draws: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared draw counter, readable after the source is moved into a cache.
    pub fn draws(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.draws)
    }
}

impl RandomSource for FixedSource {
    fn next_u64(&mut self) -> u64 {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.value
    }
}
