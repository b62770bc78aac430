//! Block address type.
//!
//! A block address is a miss address with the intra-line byte offset masked off.
//! Keeping it as a distinct type stops raw fetch addresses from reaching the
//! history log or the index table without first going through
//! [`AddressGeometry::block_of`](super::AddressGeometry::block_of).

use std::fmt;

/// A cache-line-aligned address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(pub u64);

impl BlockAddr {
    /// Creates a block address from a raw value that is already line-aligned.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<BlockAddr> for u64 {
    fn from(addr: BlockAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
