//! Set-associative cache model.
//!
//! This crate models a single set-associative hardware cache driven one access
//! at a time. It provides:
//! 1. **Configuration:** Geometry, replacement and write policies, latencies.
//! 2. **Engine:** Hit/miss decision, victim selection, write policy handling and
//!    a sequential-access predictor that grants a reduced memory latency.
//! 3. **Statistics:** An accumulating [`AccessResponse`] of hits, misses,
//!    evictions and cycles.
//!
//! Trace parsing and reporting are left to the driver; the engine only needs a
//! decoded `(is_write, set_index, tag)` request and a response to add into.

/// Common types (block addresses, configuration errors).
pub mod common;
/// Cache configuration (geometry, policies, latencies).
pub mod config;
/// The cache engine and its per-set storage.
pub mod cache;
/// Per-session access statistics.
pub mod stats;

/// Cache engine; construct with [`Cache::new`] or [`Cache::try_new`].
pub use crate::cache::Cache;
/// Immutable cache parameters.
pub use crate::config::{CacheConfig, ReplacementPolicy, WritePolicy};
/// Accumulated statistics for one or more accesses.
pub use crate::stats::AccessResponse;
