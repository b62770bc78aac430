//! LRU Index Set Tests.
//!
//! Verifies hit/miss decisions, the previous-position handoff on hits, and
//! least-recently-used eviction within one associative set.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tifs_core::prefetch::{IndexEntry, LruSet, SetPolicy};

/// Candidate entry as the index table builds it.
fn entry(tag: u64, pos: usize) -> IndexEntry {
    IndexEntry::new(tag, pos, true)
}

// ══════════════════════════════════════════════════════════
// 1. Entry identity
// ══════════════════════════════════════════════════════════

/// Entries compare by tag only.
#[test]
fn entries_equal_by_tag() {
    assert_eq!(IndexEntry::new(0x10, 1, true), IndexEntry::new(0x10, 7, false));
    assert_ne!(IndexEntry::new(0x10, 1, true), IndexEntry::new(0x20, 1, true));
}

// ══════════════════════════════════════════════════════════
// 2. Miss path
// ══════════════════════════════════════════════════════════

/// A miss inserts the candidate and returns it.
#[test]
fn miss_returns_candidate() {
    let mut set = LruSet::with_ways(4);
    let result = set.lookup_or_insert(entry(0xA, 5));
    assert!(!result.hit);
    assert_eq!(result.entry.tag, 0xA);
    assert_eq!(result.entry.log_position, 5);
    assert!(result.entry.valid);
    assert_eq!(set.len(), 1);
    assert!(set.contains(0xA));
}

/// Misses below capacity append in MRU order without evicting.
#[test]
fn misses_fill_without_eviction() {
    let mut set = LruSet::with_ways(3);
    for (pos, tag) in [0xA, 0xB, 0xC].into_iter().enumerate() {
        let _ = set.lookup_or_insert(entry(tag, pos));
    }
    assert_eq!(set.tags(), vec![0xA, 0xB, 0xC]);
}

/// Inserting `ways + 1` distinct tags evicts exactly the first one.
#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
fn overflow_evicts_first_inserted(#[case] ways: usize) {
    let mut set = LruSet::with_ways(ways);
    for tag in 0..=ways as u64 {
        let _ = set.lookup_or_insert(entry(tag, tag as usize));
    }
    assert_eq!(set.len(), ways);
    assert!(!set.contains(0), "first-inserted tag should be the victim");
    for tag in 1..=ways as u64 {
        assert!(set.contains(tag));
    }
}

// ══════════════════════════════════════════════════════════
// 3. Hit path
// ══════════════════════════════════════════════════════════

/// A hit returns where the tag was last seen and records the new position.
#[test]
fn hit_returns_previous_position() {
    let mut set = LruSet::with_ways(4);
    let _ = set.lookup_or_insert(entry(0xA, 3));

    let first = set.lookup_or_insert(entry(0xA, 9));
    assert!(first.hit);
    assert_eq!(first.entry.log_position, 3);

    let second = set.lookup_or_insert(entry(0xA, 12));
    assert!(second.hit);
    assert_eq!(second.entry.log_position, 9, "set should now remember position 9");
    assert_eq!(set.len(), 1);
}

/// A hit moves the entry to MRU, so the next victim is someone else.
#[test]
fn hit_refreshes_recency() {
    let mut set = LruSet::with_ways(2);
    let _ = set.lookup_or_insert(entry(0xA, 0));
    let _ = set.lookup_or_insert(entry(0xB, 1));
    let _ = set.lookup_or_insert(entry(0xA, 2)); // A becomes MRU
    let _ = set.lookup_or_insert(entry(0xC, 3)); // evicts B

    assert_eq!(set.tags(), vec![0xA, 0xC]);
    assert!(!set.contains(0xB));
}

/// Inserts count as touches too: the oldest *touch* is evicted.
#[test]
fn insert_and_hit_share_recency_order() {
    let mut set = LruSet::with_ways(3);
    let _ = set.lookup_or_insert(entry(0xA, 0));
    let _ = set.lookup_or_insert(entry(0xB, 1));
    let _ = set.lookup_or_insert(entry(0xA, 2));
    let _ = set.lookup_or_insert(entry(0xC, 3));
    assert_eq!(set.tags(), vec![0xB, 0xA, 0xC]);

    let _ = set.lookup_or_insert(entry(0xD, 4));
    assert_eq!(set.tags(), vec![0xA, 0xC, 0xD]);
}

/// `contains` does not disturb recency order.
#[test]
fn contains_is_read_only() {
    let mut set = LruSet::with_ways(2);
    let _ = set.lookup_or_insert(entry(0xA, 0));
    let _ = set.lookup_or_insert(entry(0xB, 1));
    assert!(set.contains(0xA));
    let _ = set.lookup_or_insert(entry(0xC, 2));
    assert!(!set.contains(0xA), "A was still LRU despite contains()");
}

// ══════════════════════════════════════════════════════════
// 4. Clear
// ══════════════════════════════════════════════════════════

/// Clearing empties the set but keeps its associativity.
#[test]
fn clear_empties_set() {
    let mut set = LruSet::with_ways(2);
    let _ = set.lookup_or_insert(entry(0xA, 0));
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.ways(), 2);
    assert!(!set.lookup_or_insert(entry(0xA, 1)).hit);
}

/// The policy reports its name for the geometry dump.
#[test]
fn policy_name() {
    assert_eq!(LruSet::NAME, "LRU");
}
