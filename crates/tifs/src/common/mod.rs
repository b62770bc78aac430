//! Common types shared by every prefetcher component.
//!
//! This module provides:
//! 1. **Address Types:** A strong type for cache-line-aligned block addresses.
//! 2. **Geometry:** Bit slicing of 64-bit addresses into tag, set index, and byte offset.
//! 3. **Error Handling:** Construction errors for invalid configurations.

/// Block address type definition.
pub mod addr;

/// Error types for configuration and construction.
pub mod error;

/// Address bit slicing (byte offset, set index, tag).
pub mod geometry;

pub use addr::BlockAddr;
pub use error::ConfigError;
pub use geometry::AddressGeometry;
