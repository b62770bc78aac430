//! Set-associative index over the miss history.
//!
//! Maps a block address to the log position where it last missed. The table is
//! split into sets by address bits; each set is a small associative structure
//! whose replacement behavior is supplied by a [`SetPolicy`] chosen at compile
//! time.
//!
//! # Policies
//!
//! - `LruSet`: Least Recently Used (the default).

/// Least Recently Used set implementation.
pub mod lru;

/// Index table (set routing and staleness check).
pub mod table;

pub use lru::LruSet;
pub use table::{IndexLookup, IndexTable};

/// A single associative record: where a tag last appeared in the history log.
///
/// Two entries are equal when their tags are equal; the log position and the
/// valid bit are payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexEntry {
    /// Tag bits of the block address (in place, not shifted).
    pub tag: u64,
    /// Slot in the miss history log.
    pub log_position: usize,
    /// Whether `log_position` can be trusted for replay.
    pub valid: bool,
}

impl IndexEntry {
    /// Creates an entry.
    pub const fn new(tag: u64, log_position: usize, valid: bool) -> Self {
        Self {
            tag,
            log_position,
            valid,
        }
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for IndexEntry {}

/// Result of a single-set lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetLookup {
    /// Whether the candidate's tag was already present.
    pub hit: bool,
    /// On a hit, the entry as it was *before* this lookup (its previous log
    /// position). On a miss, the candidate that was just inserted.
    pub entry: IndexEntry,
}

/// Trait for index set replacement policies.
///
/// A set holds at most `ways` entries with distinct tags. Implementations own
/// both the entries and the recency/insertion state used to pick a victim.
pub trait SetPolicy: Send + Sync + std::fmt::Debug {
    /// Short policy name reported in the table geometry.
    const NAME: &'static str;

    /// Creates an empty set holding up to `ways` entries.
    fn with_ways(ways: usize) -> Self;

    /// Looks up `candidate.tag`, recording `candidate` as the newest entry.
    ///
    /// On a hit the stored entry is overwritten with `candidate` and its
    /// previous contents are returned. On a miss `candidate` is inserted,
    /// evicting a victim if the set is full.
    fn lookup_or_insert(&mut self, candidate: IndexEntry) -> SetLookup;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Whether the set holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn ways(&self) -> usize;

    /// Whether an entry with `tag` is present. Does not touch recency state.
    fn contains(&self, tag: u64) -> bool;

    /// Tags currently held, in victim order (next victim first).
    fn tags(&self) -> Vec<u64>;

    /// Removes every entry.
    fn clear(&mut self);
}
