//! Common types shared by the configuration and the engine.
//!
//! 1. **Block Addresses:** A strong type for block-aligned addresses and the
//!    tag/set-index/byte-offset split.
//! 2. **Error Handling:** Configuration loading and validation errors.

/// Block address type and address decomposition.
pub mod addr;

/// Configuration error type.
pub mod error;

pub use addr::BlockAddr;
pub use error::ConfigError;
