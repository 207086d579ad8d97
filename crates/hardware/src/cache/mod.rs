//! Set-Associative Cache Engine.
//!
//! This module implements the access state machine of a single set-associative
//! cache. Each call to [`Cache::access`] consumes one decoded request, updates
//! the target set and the sequential predictor, and adds its hits, misses,
//! evictions and cycles to an [`AccessResponse`].
//!
//! Per line the states are `Invalid`, `Valid-Clean` and `Valid-Dirty`:
//! a load makes a line `Valid-Clean`, a write makes it `Valid-Dirty`, and both
//! eviction and the write-back of a just-written line return it to `Invalid`.

/// Per-access event reporting.
pub mod event;
/// Sequential access predictor.
pub mod predictor;
/// Random source for random replacement.
pub mod random;
/// Cache line metadata and set storage.
pub mod set;

use std::fmt;

use tracing::{debug, trace};

use self::event::{AccessEvent, AccessObserver, NoopObserver};
use self::predictor::{PREFETCH_CYCLES, SequentialPredictor};
use self::random::{RandomSource, XorShift64};
use self::set::{CacheLine, CacheSet};
use crate::common::ConfigError;
use crate::config::{CacheConfig, ReplacementPolicy, WritePolicy};
use crate::stats::AccessResponse;

/// Latencies and policy in effect for one access.
struct AccessCost {
    cache: u64,
    memory: u64,
    write_back: bool,
}

/// A single set-associative cache.
///
/// Owns its configuration, one [`CacheSet`] per set index, the sequential
/// predictor and its random source. Instances share no state, so independent
/// traces may be simulated on separate instances concurrently.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    sets: Vec<CacheSet>,
    predictor: SequentialPredictor,
    rng: Box<dyn RandomSource>,
}

impl Cache {
    /// Creates a cache with every line invalid.
    ///
    /// The configuration is not validated; a zero set count or associativity
    /// is raised to one. Random replacement draws from a [`XorShift64`]
    /// seeded with `config.seed`.
    pub fn new(config: CacheConfig) -> Self {
        let rng = XorShift64::new(config.seed);
        Self::with_random_source(config, Box::new(rng))
    }

    /// Validates `config`, then creates a cache.
    ///
    /// # Errors
    ///
    /// Returns the first geometry invariant `config` violates.
    pub fn try_new(config: CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Creates a cache drawing random replacement offsets from `rng`.
    pub fn with_random_source(mut config: CacheConfig, rng: Box<dyn RandomSource>) -> Self {
        config.number_sets = config.number_sets.max(1);
        config.associativity = config.associativity.max(1);

        debug!(
            sets = config.number_sets,
            ways = config.associativity,
            block_size = config.block_size,
            policy = ?config.replacement_policy,
            write_policy = ?config.write_policy,
            "cache created"
        );

        Self {
            sets: (0..config.number_sets)
                .map(|_| CacheSet::new(config.associativity))
                .collect(),
            predictor: SequentialPredictor::new(),
            rng,
            config,
        }
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// All sets, indexed by set index.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// The set at `set_index`, if in range.
    pub fn set(&self, set_index: usize) -> Option<&CacheSet> {
        self.sets.get(set_index)
    }

    /// The sequential predictor state.
    pub const fn predictor(&self) -> &SequentialPredictor {
        &self.predictor
    }

    /// Returns true if set `set_index` holds a valid line tagged `tag`.
    pub fn contains(&self, set_index: usize, tag: u64) -> bool {
        self.set(set_index)
            .is_some_and(|set| set.lines().any(|line| line.matches(tag)))
    }

    /// Performs one access and adds its outcome to `response`.
    ///
    /// # Arguments
    ///
    /// * `response` - Statistics to accumulate into; fields are only incremented.
    /// * `is_write` - Whether the access is a write.
    /// * `set_index` - Set index in `[0, number_sets)`.
    /// * `tag` - Tag of the requested block.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is out of range; decoding addresses is the caller's job.
    pub fn access(
        &mut self,
        response: &mut AccessResponse,
        is_write: bool,
        set_index: usize,
        tag: u64,
    ) {
        self.access_observed(response, is_write, set_index, tag, &mut NoopObserver);
    }

    /// Performs one access, reporting each action to `observer`.
    ///
    /// See [`Cache::access`].
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is out of range.
    pub fn access_observed(
        &mut self,
        response: &mut AccessResponse,
        is_write: bool,
        set_index: usize,
        tag: u64,
        observer: &mut dyn AccessObserver,
    ) {
        let block = self.config.block_address(set_index, tag);
        let prefetched = self.predictor.observe(block, self.config.block_size);
        let cost = AccessCost {
            cache: self.config.cache_access_cycles,
            memory: if prefetched {
                PREFETCH_CYCLES
            } else {
                self.config.memory_access_cycles
            },
            write_back: self.config.write_policy == WritePolicy::WriteBack,
        };

        let mut emit = |event: AccessEvent| {
            trace!(set = set_index, tag, is_write, prefetched, event = %event, "cache event");
            observer.on_event(event);
        };

        let set = &mut self.sets[set_index];

        if let Some(line) = set.find_mut(tag) {
            response.hits += 1;
            response.cycles += cost.cache;
            if is_write {
                emit(AccessEvent::HitWrite);
                line.dirty = true;
                write_back_written(line, &cost, response, &mut emit);
            } else {
                emit(AccessEvent::HitRead);
            }
            return;
        }

        response.misses += 1;

        if set.is_full() {
            if self.config.replacement_policy == ReplacementPolicy::Random {
                let offset = self.rng.below(set.associativity());
                set.rotate_by(offset);
            }
            set.skip_valid();
            evict(set.front_mut(), &cost, response, &mut emit);
            response.evictions += 1;
        }

        let victim = set.front_mut();
        if victim.valid {
            evict(victim, &cost, response, &mut emit);
            if !prefetched {
                response.evictions += 1;
            }
        }

        emit(AccessEvent::MissLoad);
        response.cycles += cost.memory;
        victim.valid = true;
        victim.tag = tag;
        response.cycles += cost.cache;

        if is_write {
            victim.dirty = true;
            write_back_written(victim, &cost, response, &mut emit);
        }

        set.rotate();
    }
}

/// Writes back a just-written line under write-back, invalidating it.
fn write_back_written(
    line: &mut CacheLine,
    cost: &AccessCost,
    response: &mut AccessResponse,
    emit: &mut impl FnMut(AccessEvent),
) {
    if line.dirty && cost.write_back {
        emit(AccessEvent::Writeback);
        response.cycles += cost.memory;
        line.dirty = false;
        line.valid = false;
    }
}

/// Invalidates a victim line, writing it back first if dirty under write-back.
///
/// Does not count the eviction; callers decide whether it is counted.
fn evict(
    line: &mut CacheLine,
    cost: &AccessCost,
    response: &mut AccessResponse,
    emit: &mut impl FnMut(AccessEvent),
) {
    if line.dirty && cost.write_back {
        emit(AccessEvent::Writeback);
        response.cycles += cost.memory;
        response.dirty_evictions += 1;
    }
    line.dirty = false;
    line.valid = false;
    emit(AccessEvent::Eviction);
}

impl fmt::Display for Cache {
    /// Dumps every set front to back as `[vd|tag]` cells, then a `----` line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for set in &self.sets {
            for line in set.lines() {
                write!(
                    f,
                    "[{}{}|{}]",
                    u8::from(line.valid),
                    u8::from(line.dirty),
                    line.tag
                )?;
            }
            writeln!(f)?;
        }
        writeln!(f, "----")
    }
}
