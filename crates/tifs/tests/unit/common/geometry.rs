//! Address Geometry Tests.
//!
//! Verifies the bit slicing of 64-bit addresses into tag, set index, and byte
//! offset, and the construction errors for geometries that cannot be sliced.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tifs_core::common::{AddressGeometry, BlockAddr, ConfigError};

// ══════════════════════════════════════════════════════════
// 1. Derived widths and masks
// ══════════════════════════════════════════════════════════

/// The default 1024-set, 4-way, 64-byte geometry.
#[test]
fn default_geometry_masks() {
    let g = AddressGeometry::new(1024, 4, 64).unwrap();
    assert_eq!(g.byte_bits(), 6);
    assert_eq!(g.set_bits(), 10);
    assert_eq!(g.tag_bits(), 48);
    assert_eq!(g.byte_mask(), 0x3F);
    assert_eq!(g.set_mask(), 0xFFC0);
    assert_eq!(g.tag_mask(), 0xFFFF_FFFF_FFFF_0000);
}

/// Bit widths always add up to the 64-bit address width.
#[rstest]
#[case(1, 1)]
#[case(1, 64)]
#[case(16, 64)]
#[case(1024, 64)]
#[case(4096, 128)]
fn widths_cover_address(#[case] sets: usize, #[case] block: u64) {
    let g = AddressGeometry::new(sets, 2, block).unwrap();
    assert_eq!(g.byte_bits() + g.set_bits() + g.tag_bits(), 64);
    assert_eq!(g.byte_mask() | g.set_mask() | g.tag_mask(), u64::MAX);
    assert_eq!(g.byte_mask() & g.set_mask(), 0);
    assert_eq!(g.set_mask() & g.tag_mask(), 0);
    assert_eq!(g.byte_mask() & g.tag_mask(), 0);
}

/// A single set has no index bits; every block maps to set 0.
#[test]
fn single_set_has_empty_set_mask() {
    let g = AddressGeometry::new(1, 4, 64).unwrap();
    assert_eq!(g.set_bits(), 0);
    assert_eq!(g.set_mask(), 0);
    assert_eq!(g.set_index(BlockAddr(0xDEAD_BEC0)), 0);
}

/// One-byte blocks have no offset bits.
#[test]
fn byte_sized_blocks_have_empty_byte_mask() {
    let g = AddressGeometry::new(16, 1, 1).unwrap();
    assert_eq!(g.byte_mask(), 0);
    assert_eq!(g.block_of(0x1237), BlockAddr(0x1237));
    assert_eq!(g.set_index(BlockAddr(0x1237)), 0x7);
}

/// Offset and index bits consuming the whole address leave an empty tag.
#[cfg(target_pointer_width = "64")]
#[test]
fn full_width_index_leaves_empty_tag() {
    let g = AddressGeometry::new(1usize << 32, 1, 1u64 << 32).unwrap();
    assert_eq!(g.tag_bits(), 0);
    assert_eq!(g.tag_mask(), 0);
    assert_eq!(g.set_mask(), 0xFFFF_FFFF_0000_0000);
}

// ══════════════════════════════════════════════════════════
// 2. Slicing
// ══════════════════════════════════════════════════════════

/// Truncation clears the intra-line offset only.
#[rstest]
#[case(0x1000, 0x1000)]
#[case(0x1001, 0x1000)]
#[case(0x103F, 0x1000)]
#[case(0x1040, 0x1040)]
#[case(u64::MAX, 0xFFFF_FFFF_FFFF_FFC0)]
fn block_of_truncates_offset(#[case] addr: u64, #[case] expected: u64) {
    let g = AddressGeometry::new(1024, 4, 64).unwrap();
    assert_eq!(g.block_of(addr), BlockAddr(expected));
}

/// Set index selects bits [byte_bits, byte_bits + set_bits).
#[test]
fn set_index_and_tag() {
    let g = AddressGeometry::new(16, 4, 64).unwrap();
    let blk = g.block_of(0xABCD_1234);
    // 0xABCD_1234 & !0x3F = 0xABCD_1200; (0x1200 >> 6) & 0xF = 0x48 & 0xF = 8
    assert_eq!(g.set_index(blk), 8);
    assert_eq!(g.tag(blk), 0xABCD_1000);
}

/// Tag and set index together reconstruct the block address.
#[test]
fn tag_and_set_reconstruct_block() {
    let g = AddressGeometry::new(1024, 4, 64).unwrap();
    let blk = g.block_of(0x7FFF_8000_1234_5678);
    let rebuilt = g.tag(blk) | ((g.set_index(blk) as u64) << g.byte_bits());
    assert_eq!(BlockAddr(rebuilt), blk);
}

/// Addresses differing only above the set bits share a set but not a tag.
#[test]
fn aliasing_blocks_share_set_not_tag() {
    let g = AddressGeometry::new(4, 2, 64).unwrap();
    let x = g.block_of(0x0000);
    let y = g.block_of(0x0100);
    assert_eq!(g.set_index(x), g.set_index(y));
    assert_ne!(g.tag(x), g.tag(y));
}

// ══════════════════════════════════════════════════════════
// 3. Construction errors
// ══════════════════════════════════════════════════════════

/// Zero sets is rejected.
#[test]
fn zero_sets_rejected() {
    assert!(matches!(AddressGeometry::new(0, 4, 64), Err(ConfigError::ZeroSets)));
}

/// Zero ways is rejected.
#[test]
fn zero_ways_rejected() {
    assert!(matches!(AddressGeometry::new(16, 0, 64), Err(ConfigError::ZeroWays)));
}

/// Non-power-of-two set counts cannot be bit-sliced.
#[test]
fn non_power_of_two_sets_rejected() {
    let err = AddressGeometry::new(12, 4, 64).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NotPowerOfTwo {
            field: "num_sets",
            value: 12
        }
    ));
}

/// Non-power-of-two (and zero) block sizes cannot be bit-sliced.
#[rstest]
#[case(0)]
#[case(48)]
#[case(65)]
fn bad_block_size_rejected(#[case] block: u64) {
    let err = AddressGeometry::new(16, 4, block).unwrap_err();
    assert!(matches!(err, ConfigError::NotPowerOfTwo { field: "block_size", .. }));
}

/// Offset plus index bits wider than the address is rejected.
#[test]
fn too_many_index_bits_rejected() {
    let err = AddressGeometry::new(4, 1, 1u64 << 63).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::AddressTooNarrow {
            byte_bits: 63,
            set_bits: 2
        }
    ));
}

/// Error messages name the offending field.
#[test]
fn error_messages() {
    assert_eq!(ConfigError::ZeroWays.to_string(), "ways should be a positive integer");
    let err = AddressGeometry::new(12, 4, 64).unwrap_err();
    assert_eq!(err.to_string(), "num_sets must be a power of two (got 12)");
}

/// Block addresses print as hex.
#[test]
fn block_addr_display() {
    assert_eq!(BlockAddr::new(0x1040).to_string(), "0x1040");
    assert_eq!(u64::from(BlockAddr::new(0x80)), 0x80);
}
