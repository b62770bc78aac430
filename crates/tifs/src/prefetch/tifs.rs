//! Temporal Replay Engine.
//!
//! A prefetcher that recognizes a repeated instruction-fetch miss and replays
//! the misses that followed it the last time it occurred. Every miss runs the
//! same sequence:
//!
//! 1. Truncate the address to its cache line.
//! 2. Look the block up in the index table, passing the log slot it is about
//!    to occupy.
//! 3. Append the block to the miss history log.
//! 4. If the index returned a trustworthy historical position, prefetch up to
//!    `prefetch_depth` of the addresses logged after it.
//!
//! Hits are ignored. All learned state lives in the log and the table, both
//! owned by the engine, so each instruction stream needs its own instance.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W + D) per miss, where W is the associativity and
//!   D is the replay depth
//! - **Space Complexity:** O(S × W + C) for S sets and a log of capacity C
//! - **Best Case:** Recurring fetch sequences (loops, repeated call chains)
//! - **Worst Case:** Code footprints larger than the history log

use tracing::{debug, info, trace};

use super::history::MissHistoryLog;
use super::index::{IndexLookup, IndexTable, LruSet, SetPolicy};
use super::{PrefetchSink, Prefetcher};
use crate::common::{AddressGeometry, ConfigError};
use crate::config::TifsConfig;
use crate::stats::TifsStats;

/// What the engine decided for one miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    /// First occurrence of this block in the index; nothing to replay.
    Cold,
    /// The block was indexed but its log slot has since been overwritten.
    Stale {
        /// The outdated log position.
        position: usize,
    },
    /// The block was found at a trustworthy log position and replayed.
    Replayed {
        /// Log position of the previous occurrence.
        position: usize,
        /// Number of prefetches issued.
        issued: usize,
    },
}

/// Temporal instruction-fetch streaming prefetcher for one instruction stream.
#[derive(Debug)]
pub struct TemporalReplayEngine<P: SetPolicy = LruSet> {
    geometry: AddressGeometry,
    table: IndexTable<P>,
    log: MissHistoryLog,
    depth: usize,
    stats: TifsStats,
}

impl TemporalReplayEngine<LruSet> {
    /// Creates an LRU-indexed engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Table geometry, log capacity, and replay depth.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn new(config: &TifsConfig) -> Result<Self, ConfigError> {
        Self::with_policy(config)
    }
}

impl<P: SetPolicy> TemporalReplayEngine<P> {
    /// Creates an engine whose index sets use replacement policy `P`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn with_policy(config: &TifsConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        Ok(Self {
            geometry,
            table: IndexTable::new(geometry),
            log: MissHistoryLog::new(config.log_capacity)?,
            depth: config.prefetch_depth,
            stats: TifsStats::default(),
        })
    }

    /// Startup notification: reports the table geometry.
    pub fn initialize(&self) {
        info!(
            log_capacity = self.log.capacity(),
            prefetch_depth = self.depth,
            "TIFS prefetcher\n{}",
            self.table
        );
    }

    /// Handles one instruction-fetch miss.
    ///
    /// # Arguments
    ///
    /// * `addr` - The faulting fetch address (any byte within the line).
    /// * `sink` - Receives each replayed block address, oldest first.
    ///
    /// # Returns
    ///
    /// Whether the miss was cold, stale, or replayed (and how many prefetches
    /// were issued).
    pub fn on_miss<S>(&mut self, addr: u64, sink: &mut S) -> LookupOutcome
    where
        S: PrefetchSink + ?Sized,
    {
        self.stats.misses += 1;

        let blk = self.geometry.block_of(addr);
        let lookup = self.table.lookup_classified(blk, self.log.tail(), &self.log);
        self.log.append(blk);

        match lookup {
            IndexLookup::Cold(_) => {
                self.stats.index_misses += 1;
                LookupOutcome::Cold
            }
            IndexLookup::Stale(entry) => {
                self.stats.index_hits += 1;
                self.stats.stale_matches += 1;
                debug!(block = %blk, position = entry.log_position, "stale index entry");
                LookupOutcome::Stale {
                    position: entry.log_position,
                }
            }
            IndexLookup::Match(entry) => {
                self.stats.index_hits += 1;
                let issued = self.replay(entry.log_position, sink);
                LookupOutcome::Replayed {
                    position: entry.log_position,
                    issued,
                }
            }
        }
    }

    /// Issues the addresses that followed log slot `base`.
    fn replay<S>(&mut self, base: usize, sink: &mut S) -> usize
    where
        S: PrefetchSink + ?Sized,
    {
        if self.log.followers_available(base) < self.depth {
            self.stats.truncated_replays += 1;
        }

        let mut issued = 0;
        for target in self.log.successors(base, self.depth) {
            trace!(target = %target, "prefetch");
            sink.issue(target);
            issued += 1;
        }

        self.stats.replays += 1;
        self.stats.prefetches_issued += issued as u64;
        issued
    }

    /// Forgets all learned history. Statistics are kept.
    pub fn reset(&mut self) {
        debug!("resetting TIFS history");
        self.log.reset();
        self.table.reset();
    }

    /// End-of-run notification: returns the diagnostic counters.
    pub const fn final_stats(&self) -> &TifsStats {
        &self.stats
    }

    /// The miss history log.
    pub const fn log(&self) -> &MissHistoryLog {
        &self.log
    }

    /// The index table.
    pub const fn table(&self) -> &IndexTable<P> {
        &self.table
    }

    /// Maximum number of addresses replayed per match.
    pub const fn prefetch_depth(&self) -> usize {
        self.depth
    }
}

impl<P: SetPolicy> Prefetcher for TemporalReplayEngine<P> {
    /// Observes an instruction-fetch access.
    ///
    /// Hits are counted and otherwise ignored. Misses run the replay sequence
    /// and return the replayed block addresses in temporal order.
    fn observe(&mut self, addr: u64, hit: bool) -> Vec<u64> {
        if hit {
            self.stats.hits_ignored += 1;
            return Vec::new();
        }

        let mut prefetches: Vec<u64> = Vec::with_capacity(self.depth);
        let _outcome = self.on_miss(addr, &mut prefetches);
        prefetches
    }
}
