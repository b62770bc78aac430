//! Temporal replay prefetching.
//!
//! This module contains the host-facing interfaces and the components of the
//! temporal instruction-fetch streaming prefetcher:
//! 1. **History:** [`MissHistoryLog`], the ring of past miss addresses.
//! 2. **Index:** [`IndexTable`], mapping a block address to its last log position.
//! 3. **Engine:** [`TemporalReplayEngine`], the per-miss decision procedure.

/// Circular miss history log.
pub mod history;

/// Set-associative index over the miss history.
pub mod index;

/// Temporal replay engine.
pub mod tifs;

pub use self::history::MissHistoryLog;
pub use self::index::{IndexEntry, IndexLookup, IndexTable, LruSet, SetLookup, SetPolicy};
pub use self::tifs::{LookupOutcome, TemporalReplayEngine};

use crate::common::BlockAddr;

/// Trait for cache prefetcher implementations.
///
/// Prefetchers observe memory access patterns and generate prefetch
/// requests to reduce cache miss penalties.
pub trait Prefetcher: Send + Sync {
    /// Observes a memory access and generates prefetch addresses.
    ///
    /// Called by the cache on each access to allow the prefetcher to
    /// learn access patterns and generate prefetch requests.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was accessed
    /// * `hit` - Whether the access was a cache hit
    ///
    /// # Returns
    ///
    /// A vector of addresses to prefetch. Empty if no prefetches are needed.
    fn observe(&mut self, addr: u64, hit: bool) -> Vec<u64>;
}

/// Destination for prefetch requests.
///
/// The host implements this for whatever submits a line fill into its memory
/// hierarchy. Each call carries exactly one block address; replayed addresses
/// arrive in temporal order.
pub trait PrefetchSink {
    /// Submits a prefetch for one cache line.
    fn issue(&mut self, addr: BlockAddr);
}

impl PrefetchSink for Vec<u64> {
    fn issue(&mut self, addr: BlockAddr) {
        self.push(addr.val());
    }
}

impl PrefetchSink for Vec<BlockAddr> {
    fn issue(&mut self, addr: BlockAddr) {
        self.push(addr);
    }
}
