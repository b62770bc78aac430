//! Index Table.
//!
//! Routes a block address to its set, applies the set's replacement policy, and
//! guards the returned history position against log wraparound. A hit only
//! says the tag was seen before; the position it reports is trusted only if the
//! log slot still holds the same block address.

use std::fmt;

use tracing::trace;

use super::{IndexEntry, LruSet, SetPolicy};
use crate::common::{AddressGeometry, BlockAddr, ConfigError};
use crate::prefetch::history::MissHistoryLog;

/// Classified result of an index table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexLookup {
    /// The tag was not in its set and has just been inserted. Carries the
    /// inserted entry (prospective position, marked invalid).
    Cold(IndexEntry),
    /// The tag was present but its log slot now holds a different address.
    /// Carries the outdated position, marked invalid.
    Stale(IndexEntry),
    /// The tag was present and its log slot still holds this block address.
    /// Carries the historical position, marked valid.
    Match(IndexEntry),
}

impl IndexLookup {
    /// Returns the carried entry.
    pub const fn entry(self) -> IndexEntry {
        match self {
            Self::Cold(e) | Self::Stale(e) | Self::Match(e) => e,
        }
    }

    /// Whether the set already held this tag (valid or stale).
    pub const fn is_set_hit(self) -> bool {
        !matches!(self, Self::Cold(_))
    }
}

/// Set-associative index from block address to last log position.
///
/// The table holds at most `ways × num_sets` entries, and never more than one
/// position per (set, tag) pair.
#[derive(Clone, Debug)]
pub struct IndexTable<P: SetPolicy = LruSet> {
    geometry: AddressGeometry,
    sets: Vec<P>,
}

impl<P: SetPolicy> IndexTable<P> {
    /// Creates an empty table with the given geometry.
    pub fn new(geometry: AddressGeometry) -> Self {
        let sets = (0..geometry.num_sets())
            .map(|_| P::with_ways(geometry.ways()))
            .collect();
        Self { geometry, sets }
    }

    /// Creates an empty table from raw dimensions.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `num_sets` or `ways` is zero, or when
    /// `num_sets` or `block_size` is not a power of two.
    pub fn with_dimensions(
        num_sets: usize,
        ways: usize,
        block_size: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(AddressGeometry::new(num_sets, ways, block_size)?))
    }

    /// Looks up `blk`, records `prospective` as its newest log position, and
    /// reports where it was seen before.
    ///
    /// # Arguments
    ///
    /// * `blk` - The block address that missed.
    /// * `prospective` - The log slot `blk` is about to be written to.
    /// * `log` - The history log the positions refer to.
    ///
    /// # Returns
    ///
    /// `{tag, position, valid}` where `valid` is set only for a hit whose
    /// historical slot still holds `blk`.
    pub fn lookup(&mut self, blk: BlockAddr, prospective: usize, log: &MissHistoryLog) -> IndexEntry {
        self.lookup_classified(blk, prospective, log).entry()
    }

    /// Same as [`lookup`](Self::lookup) but tells cold misses and stale matches apart.
    pub fn lookup_classified(
        &mut self,
        blk: BlockAddr,
        prospective: usize,
        log: &MissHistoryLog,
    ) -> IndexLookup {
        let set = self.geometry.set_index(blk);
        let tag = self.geometry.tag(blk);
        let candidate = IndexEntry::new(tag, prospective, true);

        let result = self.sets[set].lookup_or_insert(candidate);
        let position = result.entry.log_position;
        trace!(block = %blk, set, hit = result.hit, position, "index lookup");

        if !result.hit {
            return IndexLookup::Cold(IndexEntry::new(tag, position, false));
        }
        if log.at(position) == blk {
            IndexLookup::Match(IndexEntry::new(tag, position, true))
        } else {
            IndexLookup::Stale(IndexEntry::new(tag, position, false))
        }
    }

    /// Truncates a raw address to its cache line.
    pub const fn block_address(&self, addr: u64) -> BlockAddr {
        self.geometry.block_of(addr)
    }

    /// Set that handles `blk`.
    pub const fn set_index(&self, blk: BlockAddr) -> usize {
        self.geometry.set_index(blk)
    }

    /// Tag of `blk`.
    pub const fn tag(&self, blk: BlockAddr) -> u64 {
        self.geometry.tag(blk)
    }

    /// Address slicing used by this table.
    pub const fn geometry(&self) -> &AddressGeometry {
        &self.geometry
    }

    /// Read-only view of one set.
    pub fn set(&self, index: usize) -> Option<&P> {
        self.sets.get(index)
    }

    /// Total live entries across all sets.
    pub fn len(&self) -> usize {
        self.sets.iter().map(SetPolicy::len).sum()
    }

    /// Whether no set holds an entry.
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(SetPolicy::is_empty)
    }

    /// Empties every set.
    pub fn reset(&mut self) {
        self.sets.iter_mut().for_each(SetPolicy::clear);
    }
}

impl<P: SetPolicy> fmt::Display for IndexTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        writeln!(f, "Index Table")?;
        writeln!(f, "  replacement_algo       {}", P::NAME)?;
        writeln!(f, "  ways                   {}", g.ways())?;
        writeln!(f, "  num_sets               {}", g.num_sets())?;
        writeln!(f, "  byte_bits              {}", g.byte_bits())?;
        writeln!(f, "  set_bits               {}", g.set_bits())?;
        writeln!(f, "  tag_bits               {}", g.tag_bits())?;
        writeln!(f, "  byte_mask              {:064b}", g.byte_mask())?;
        writeln!(f, "  set_mask               {:064b}", g.set_mask())?;
        write!(f, "  tag_mask               {:064b}", g.tag_mask())
    }
}
