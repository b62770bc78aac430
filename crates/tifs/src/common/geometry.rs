//! Address geometry for the set-associative index.
//!
//! Splits a 64-bit address into three disjoint fields:
//!
//! ```text
//!   63                      byte_bits+set_bits     byte_bits         0
//!   ┌──────────────────────────┬──────────────────────┬─────────────┐
//!   │           tag            │      set index       │ byte offset │
//!   └──────────────────────────┴──────────────────────┴─────────────┘
//! ```
//!
//! The tag is kept in place (not shifted down), so a tag together with its set
//! index reconstructs the block address exactly.

use super::addr::BlockAddr;
use super::error::ConfigError;

/// Width of the addresses observed by the prefetcher.
pub const ADDR_BITS: u32 = 64;

/// Returns a mask with the low `bits` bits set, saturating at 64 bits.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDR_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Derived bit widths and masks for a set-associative table.
///
/// Built once from the table dimensions and immutable afterwards, so
/// [`set_index`](Self::set_index) and [`tag`](Self::tag) are pure functions of
/// the block address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressGeometry {
    num_sets: usize,
    ways: usize,
    block_size: u64,
    byte_bits: u32,
    set_bits: u32,
    tag_bits: u32,
    byte_mask: u64,
    set_mask: u64,
    tag_mask: u64,
}

impl AddressGeometry {
    /// Derives the geometry for a table of `num_sets` sets of `ways` entries
    /// indexing `block_size`-byte lines.
    ///
    /// # Arguments
    ///
    /// * `num_sets` - Number of associative sets (power of two).
    /// * `ways` - Entries per set (positive).
    /// * `block_size` - Cache line size in bytes (power of two).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSets`] or [`ConfigError::ZeroWays`] for empty
    /// dimensions, [`ConfigError::NotPowerOfTwo`] when a size cannot be bit-sliced,
    /// and [`ConfigError::AddressTooNarrow`] when offset and index bits overflow
    /// the address width.
    pub fn new(num_sets: usize, ways: usize, block_size: u64) -> Result<Self, ConfigError> {
        if num_sets == 0 {
            return Err(ConfigError::ZeroSets);
        }
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if !block_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "block_size",
                value: block_size,
            });
        }
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "num_sets",
                value: num_sets as u64,
            });
        }

        let byte_bits = block_size.trailing_zeros();
        let set_bits = num_sets.trailing_zeros();
        if byte_bits + set_bits > ADDR_BITS {
            return Err(ConfigError::AddressTooNarrow {
                byte_bits,
                set_bits,
            });
        }
        let tag_bits = ADDR_BITS - set_bits - byte_bits;

        let byte_mask = low_mask(byte_bits);
        let set_mask = low_mask(set_bits).checked_shl(byte_bits).unwrap_or(0);
        let tag_mask = !(byte_mask | set_mask);

        Ok(Self {
            num_sets,
            ways,
            block_size,
            byte_bits,
            set_bits,
            tag_bits,
            byte_mask,
            set_mask,
            tag_mask,
        })
    }

    /// Truncates a raw address to its cache line.
    #[inline(always)]
    pub const fn block_of(&self, addr: u64) -> BlockAddr {
        BlockAddr(addr & !self.byte_mask)
    }

    /// Selects the set that handles `blk`.
    #[inline(always)]
    pub const fn set_index(&self, blk: BlockAddr) -> usize {
        ((blk.0 & self.set_mask) >> self.byte_bits) as usize
    }

    /// Extracts the tag of `blk` (left in place, not shifted).
    #[inline(always)]
    pub const fn tag(&self, blk: BlockAddr) -> u64 {
        blk.0 & self.tag_mask
    }

    /// Number of associative sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Entries per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Cache line size in bytes.
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Bits used by the intra-line offset.
    pub const fn byte_bits(&self) -> u32 {
        self.byte_bits
    }

    /// Bits used by the set index.
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Bits left for the tag.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Mask selecting the intra-line offset.
    pub const fn byte_mask(&self) -> u64 {
        self.byte_mask
    }

    /// Mask selecting the set index bits.
    pub const fn set_mask(&self) -> u64 {
        self.set_mask
    }

    /// Mask selecting the tag bits.
    pub const fn tag_mask(&self) -> u64 {
        self.tag_mask
    }
}
