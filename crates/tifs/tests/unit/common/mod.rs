//! Tests for shared types.

/// Address slicing into tag, set index, and byte offset.
pub mod geometry;
