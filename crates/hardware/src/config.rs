//! Configuration for the cache model.
//!
//! This module defines the configuration structure and enums used to
//! parameterize a cache. It provides:
//! 1. **Defaults:** Baseline geometry and latency constants.
//! 2. **Structure:** [`CacheConfig`], deserializable from JSON with per-field defaults.
//! 3. **Enums:** Replacement and write policy selection.
//! 4. **Validation:** Checks of the geometry invariants, kept separate from
//!    construction so the engine itself never rejects a configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{BlockAddr, ConfigError};

/// Default configuration constants.
mod defaults {
    /// Default number of sets (64).
    pub const NUMBER_SETS: usize = 64;

    /// Default set index width, `log2(NUMBER_SETS)`.
    pub const SET_INDEX_BITS: u32 = 6;

    /// Default associativity (4 ways).
    pub const ASSOCIATIVITY: usize = 4;

    /// Default block size in bytes (64 bytes).
    pub const BLOCK_SIZE: u64 = 64;

    /// Default byte offset width, `log2(BLOCK_SIZE)`.
    pub const BYTE_OFFSET_BITS: u32 = 6;

    /// Default cache access latency in cycles.
    pub const CACHE_ACCESS_CYCLES: u64 = 1;

    /// Default memory access latency in cycles.
    pub const MEMORY_ACCESS_CYCLES: u64 = 100;

    /// Default seed for the random replacement source.
    pub const SEED: u64 = 123_456_789;
}

/// Cache replacement policy algorithms.
///
/// Selects the line evicted from a set whose lines are all valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used.
    ///
    /// The line at the front of the set order is evicted.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Random replacement.
    ///
    /// The set order is rotated by a random offset before victim search.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

/// Write policy governing when writes reach memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WritePolicy {
    /// Dirty lines are written back to memory and invalidated.
    #[default]
    #[serde(alias = "write_back", alias = "WRITEBACK", alias = "wb")]
    WriteBack,
    /// Writes only mark the line; no memory charge is taken.
    #[serde(alias = "write_through", alias = "WRITETHROUGH", alias = "wt")]
    WriteThrough,
}

/// Cache geometry, policies and latencies.
///
/// Created once and read-only for the lifetime of a [`Cache`](crate::Cache).
/// The geometry must satisfy `number_sets == 2^num_set_index_bits`,
/// `block_size == 2^num_byte_offset_bits` and `associativity >= 1`; see
/// [`CacheConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of sets
    #[serde(default = "CacheConfig::default_number_sets")]
    pub number_sets: usize,

    /// Lines per set
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: u64,

    /// Width of the set index field
    #[serde(default = "CacheConfig::default_set_index_bits")]
    pub num_set_index_bits: u32,

    /// Width of the byte offset field
    #[serde(default = "CacheConfig::default_byte_offset_bits")]
    pub num_byte_offset_bits: u32,

    /// Replacement policy
    #[serde(default)]
    pub replacement_policy: ReplacementPolicy,

    /// Write policy
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Cycles charged per cache access
    #[serde(default = "CacheConfig::default_cache_access_cycles")]
    pub cache_access_cycles: u64,

    /// Cycles charged per memory access
    #[serde(default = "CacheConfig::default_memory_access_cycles")]
    pub memory_access_cycles: u64,

    /// Seed for the random replacement source
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    /// Returns the default number of sets.
    fn default_number_sets() -> usize {
        defaults::NUMBER_SETS
    }

    /// Returns the default associativity.
    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Returns the default block size in bytes.
    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default set index width.
    fn default_set_index_bits() -> u32 {
        defaults::SET_INDEX_BITS
    }

    /// Returns the default byte offset width.
    fn default_byte_offset_bits() -> u32 {
        defaults::BYTE_OFFSET_BITS
    }

    /// Returns the default cache access latency.
    fn default_cache_access_cycles() -> u64 {
        defaults::CACHE_ACCESS_CYCLES
    }

    /// Returns the default memory access latency.
    fn default_memory_access_cycles() -> u64 {
        defaults::MEMORY_ACCESS_CYCLES
    }

    /// Returns the default random seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Creates a configuration for the given geometry, deriving both bit widths.
    ///
    /// `number_sets` and `block_size` are expected to be powers of two; the
    /// widths are their base-2 logarithms. Policies and latencies take their
    /// defaults.
    ///
    /// # Arguments
    ///
    /// * `number_sets` - Number of sets.
    /// * `associativity` - Lines per set.
    /// * `block_size` - Block size in bytes.
    pub fn with_geometry(number_sets: usize, associativity: usize, block_size: u64) -> Self {
        Self {
            number_sets,
            associativity,
            block_size,
            num_set_index_bits: number_sets.trailing_zeros(),
            num_byte_offset_bits: block_size.trailing_zeros(),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration and validates it.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a geometry error
    /// from [`CacheConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`CacheConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if !self.number_sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(self.number_sets));
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_size));
        }
        let address_bits = self
            .num_set_index_bits
            .saturating_add(self.num_byte_offset_bits);
        if address_bits >= u64::BITS {
            return Err(ConfigError::AddressBitsOverflow(address_bits));
        }
        if 1usize.checked_shl(self.num_set_index_bits) != Some(self.number_sets) {
            return Err(ConfigError::SetIndexBitsMismatch {
                number_sets: self.number_sets,
                bits: self.num_set_index_bits,
            });
        }
        if 1u64.checked_shl(self.num_byte_offset_bits) != Some(self.block_size) {
            return Err(ConfigError::ByteOffsetBitsMismatch {
                block_size: self.block_size,
                bits: self.num_byte_offset_bits,
            });
        }
        Ok(())
    }

    /// Splits a raw address into `(set_index, tag)`, discarding the byte offset.
    pub const fn split_address(&self, addr: u64) -> (usize, u64) {
        BlockAddr::split(addr, self.num_set_index_bits, self.num_byte_offset_bits)
    }

    /// Rebuilds the block address of `tag` in set `set_index`.
    pub const fn block_address(&self, set_index: usize, tag: u64) -> BlockAddr {
        BlockAddr::from_parts(
            tag,
            set_index,
            self.num_set_index_bits,
            self.num_byte_offset_bits,
        )
    }

    /// Total capacity in bytes.
    pub const fn capacity_bytes(&self) -> u64 {
        (self.number_sets as u64)
            .saturating_mul(self.associativity as u64)
            .saturating_mul(self.block_size)
    }
}

impl Default for CacheConfig {
    /// Creates a default configuration.
    ///
    /// 64 sets of 4 ways with 64-byte blocks (16 KiB), LRU replacement,
    /// write-back, 1-cycle cache and 100-cycle memory latency.
    fn default() -> Self {
        Self {
            number_sets: defaults::NUMBER_SETS,
            associativity: defaults::ASSOCIATIVITY,
            block_size: defaults::BLOCK_SIZE,
            num_set_index_bits: defaults::SET_INDEX_BITS,
            num_byte_offset_bits: defaults::BYTE_OFFSET_BITS,
            replacement_policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            cache_access_cycles: defaults::CACHE_ACCESS_CYCLES,
            memory_access_cycles: defaults::MEMORY_ACCESS_CYCLES,
            seed: defaults::SEED,
        }
    }
}
