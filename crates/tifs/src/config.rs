//! Configuration for the TIFS prefetcher.
//!
//! This module defines the configuration structure used to size a prefetcher
//! instance. It provides:
//! 1. **Defaults:** Baseline geometry for an L1 instruction-cache prefetcher.
//! 2. **Structure:** A flat, serde-deserializable config with per-field defaults.
//! 3. **Validation:** Conversion into an [`AddressGeometry`] plus log and depth checks.
//!
//! Configuration is supplied as JSON by the host simulator, or use
//! `TifsConfig::default()` for the standard 1024-set, 4-way, 64-byte-line setup.

use serde::Deserialize;

use crate::common::{AddressGeometry, ConfigError};

/// Default configuration constants for the prefetcher.
mod defaults {
    /// Default number of index table sets (1024).
    pub const NUM_SETS: usize = 1024;

    /// Default index table associativity (4 ways).
    pub const WAYS: usize = 4;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches the L1 instruction cache line the miss addresses come from.
    pub const BLOCK_SIZE: u64 = 64;

    /// Default miss history log capacity (1024 block addresses).
    pub const LOG_CAPACITY: usize = 1024;

    /// Default number of addresses replayed per recognized miss.
    pub const PREFETCH_DEPTH: usize = 3;
}

/// Prefetcher configuration.
///
/// All fields are fixed for the lifetime of a prefetcher instance.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tifs_core::config::TifsConfig;
///
/// let config = TifsConfig::default();
/// assert_eq!(config.num_sets, 1024);
/// assert_eq!(config.prefetch_depth, 3);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use tifs_core::config::TifsConfig;
///
/// let json = r#"{ "num_sets": 64, "ways": 8, "log_capacity": 4096 }"#;
///
/// let config = TifsConfig::from_json(json).unwrap();
/// assert_eq!(config.ways, 8);
/// assert_eq!(config.block_size, 64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TifsConfig {
    /// Number of associative sets in the index table (power of two)
    #[serde(default = "TifsConfig::default_num_sets")]
    pub num_sets: usize,

    /// Index table associativity (entries per set)
    #[serde(default = "TifsConfig::default_ways")]
    pub ways: usize,

    /// Cache line size in bytes (power of two); determines address truncation
    #[serde(default = "TifsConfig::default_block_size")]
    pub block_size: u64,

    /// Number of historical miss addresses retained (power of two)
    #[serde(default = "TifsConfig::default_log_capacity")]
    pub log_capacity: usize,

    /// Maximum number of addresses replayed per recognized miss
    #[serde(default = "TifsConfig::default_prefetch_depth")]
    pub prefetch_depth: usize,
}

impl TifsConfig {
    /// Returns the default number of index table sets.
    fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    /// Returns the default index table associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default cache line size in bytes.
    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default miss history log capacity.
    fn default_log_capacity() -> usize {
        defaults::LOG_CAPACITY
    }

    /// Returns the default replay depth.
    fn default_prefetch_depth() -> usize {
        defaults::PREFETCH_DEPTH
    }

    /// Parses a configuration from a JSON object.
    ///
    /// Missing fields take their defaults. The result is not validated; call
    /// [`validate`](Self::validate) or hand it to an engine constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `json` is malformed or a field has the
    /// wrong type.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks every field and derives the index table geometry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking the table geometry
    /// first, then the log capacity, then the replay depth.
    pub fn validate(&self) -> Result<AddressGeometry, ConfigError> {
        let geometry = AddressGeometry::new(self.num_sets, self.ways, self.block_size)?;

        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.log_capacity.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "log_capacity",
                value: self.log_capacity as u64,
            });
        }
        if self.prefetch_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        Ok(geometry)
    }
}

impl Default for TifsConfig {
    /// Creates the default configuration.
    ///
    /// 1024 sets of 4 ways over 64-byte lines, a 1024-entry history log, and a
    /// replay depth of 3.
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            ways: defaults::WAYS,
            block_size: defaults::BLOCK_SIZE,
            log_capacity: defaults::LOG_CAPACITY,
            prefetch_depth: defaults::PREFETCH_DEPTH,
        }
    }
}
