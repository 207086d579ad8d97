//! Configuration error definitions.
//!
//! The engine itself never fails: an access always runs to completion and
//! updates the response. Errors only arise when loading or validating a
//! [`CacheConfig`](crate::config::CacheConfig) ahead of constructing a cache.

use thiserror::Error;

/// Errors raised while loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A set must hold at least one line.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// The number of sets is zero or not a power of two.
    #[error("number of sets ({0}) is not a power of two")]
    SetsNotPowerOfTwo(usize),

    /// `number_sets != 2^num_set_index_bits`.
    #[error("number of sets ({number_sets}) does not match {bits} set index bits")]
    SetIndexBitsMismatch {
        /// Configured number of sets.
        number_sets: usize,
        /// Configured set index width.
        bits: u32,
    },

    /// The block size is zero or not a power of two.
    #[error("block size ({0} bytes) is not a power of two")]
    BlockSizeNotPowerOfTwo(u64),

    /// `block_size != 2^num_byte_offset_bits`.
    #[error("block size ({block_size} bytes) does not match {bits} byte offset bits")]
    ByteOffsetBitsMismatch {
        /// Configured block size in bytes.
        block_size: u64,
        /// Configured byte offset width.
        bits: u32,
    },

    /// Set index and byte offset together leave no room for a tag.
    #[error("set index and byte offset use {0} bits, leaving no tag bits in a 64-bit address")]
    AddressBitsOverflow(u32),

    /// The configuration text is not valid JSON for a cache configuration.
    #[error("failed to parse cache configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read cache configuration: {0}")]
    Io(#[from] std::io::Error),
}
