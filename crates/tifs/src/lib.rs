//! Temporal instruction-fetch streaming (TIFS) prefetcher.
//!
//! This crate implements a history-based instruction-miss prefetcher for cycle-level
//! cache simulators. It provides the following:
//! 1. **History:** A circular log of missed block addresses in temporal order.
//! 2. **Index:** A set-associative table mapping a block address to its last position
//!    in the log, with LRU replacement and staleness detection across log wraparound.
//! 3. **Replay:** The per-miss engine that recognizes a repeated miss and prefetches
//!    the addresses that followed it last time.
//! 4. **Configuration and statistics:** Validated geometry, JSON config, and
//!    diagnostic counters for end-of-run reporting.
//!
//! The host simulator owns one [`TemporalReplayEngine`] per instruction stream and
//! feeds it every L1-I access through the [`Prefetcher`](prefetch::Prefetcher) trait.

/// Common types (block addresses, address geometry, errors).
pub mod common;
/// Prefetcher configuration (defaults and validation).
pub mod config;
/// Miss history, index table, and the temporal replay engine.
pub mod prefetch;
/// Diagnostic counters and reporting.
pub mod stats;

/// Root configuration type; use `TifsConfig::default()` or deserialize from JSON.
pub use crate::config::TifsConfig;
/// Per-stream prefetcher; construct with `TemporalReplayEngine::new`.
pub use crate::prefetch::TemporalReplayEngine;
