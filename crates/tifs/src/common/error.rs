//! Construction error definitions.
//!
//! The prefetcher performs no I/O and has no runtime failure modes. Every error
//! is raised while building the geometry, the history log, or the engine from a
//! configuration, and none of them is recoverable by retrying.

use thiserror::Error;

/// Errors raised when a configuration cannot describe a valid prefetcher.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The index table must have at least one set.
    #[error("num_sets should be a positive integer")]
    ZeroSets,

    /// Each set must hold at least one entry.
    #[error("ways should be a positive integer")]
    ZeroWays,

    /// The miss history log must retain at least one address.
    #[error("log_capacity should be a positive integer")]
    ZeroCapacity,

    /// Replay must issue at least one prefetch per match.
    #[error("prefetch_depth should be a positive integer")]
    ZeroDepth,

    /// A size used for bit slicing or ring indexing is not a power of two.
    #[error("{field} must be a power of two (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// Byte-offset and set-index bits do not fit in a 64-bit address.
    #[error("byte bits ({byte_bits}) plus set bits ({set_bits}) exceed the 64-bit address width")]
    AddressTooNarrow {
        /// Bits consumed by the intra-line offset.
        byte_bits: u32,
        /// Bits consumed by the set index.
        set_bits: u32,
    },

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
