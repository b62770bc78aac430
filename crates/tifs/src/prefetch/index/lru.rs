//! Least Recently Used (LRU) Index Set.
//!
//! Each set keeps its entries in a recency queue. The front of the queue is the
//! least recently used entry and the back is the most recently used. A hit or
//! an insert moves the touched entry to the back; when the set is full the
//! front entry is the victim.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup_or_insert()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(W) per set
//! - **Hardware Cost:** High - requires priority encoding and shifting
//! - **Best Case:** Instruction working sets that fit in the table
//! - **Worst Case:** Many hot blocks aliasing into one set (thrashing)

use std::collections::VecDeque;

use super::{IndexEntry, SetLookup, SetPolicy};

/// LRU set state.
#[derive(Clone, Debug)]
pub struct LruSet {
    /// Index 0 is LRU, last index is MRU.
    entries: VecDeque<IndexEntry>,
    ways: usize,
}

impl SetPolicy for LruSet {
    const NAME: &'static str = "LRU";

    fn with_ways(ways: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(ways),
            ways,
        }
    }

    /// Moves the matched entry (or the newly inserted one) to the MRU position.
    ///
    /// A hit hands back the entry's previous contents, so the caller learns
    /// where the tag appeared last time while the set now remembers the
    /// candidate's position.
    fn lookup_or_insert(&mut self, candidate: IndexEntry) -> SetLookup {
        let matched = self
            .entries
            .iter()
            .position(|e| e.tag == candidate.tag)
            .and_then(|pos| self.entries.remove(pos));

        if let Some(previous) = matched {
            self.entries.push_back(candidate);
            return SetLookup {
                hit: true,
                entry: previous,
            };
        }

        if self.entries.len() >= self.ways {
            let _victim = self.entries.pop_front();
        }
        self.entries.push_back(candidate);
        SetLookup {
            hit: false,
            entry: candidate,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn ways(&self) -> usize {
        self.ways
    }

    fn contains(&self, tag: u64) -> bool {
        self.entries.iter().any(|e| e.tag == tag)
    }

    fn tags(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.tag).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
