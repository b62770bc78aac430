//! Miss History Log.
//!
//! A fixed-capacity ring buffer recording missed block addresses in the order
//! they occurred. The write cursor (`tail`) wraps modulo the capacity, so once
//! the log has been filled every append silently overwrites the oldest entry.
//! Index entries that still point at an overwritten slot are detected by the
//! index table comparing the slot content against the address being looked up.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `append()`, `at()`: O(1)
//!   - `successors()`: O(D) where D is the replay depth
//! - **Space Complexity:** O(C) where C is the log capacity

use crate::common::{BlockAddr, ConfigError};

/// Circular log of missed block addresses.
#[derive(Clone, Debug)]
pub struct MissHistoryLog {
    /// Ring storage; slot `i` holds the address written at logical position `i`.
    slots: Vec<BlockAddr>,
    /// Position the next append will write.
    tail: usize,
    /// Set once the tail has wrapped past slot 0.
    full: bool,
    /// `capacity - 1`, used to wrap positions.
    mask: usize,
}

impl MissHistoryLog {
    /// Creates an empty log.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of addresses retained (must be a power of two).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] or [`ConfigError::NotPowerOfTwo`]
    /// if `capacity` cannot be used as a ring size.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !capacity.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "log_capacity",
                value: capacity as u64,
            });
        }

        Ok(Self {
            slots: vec![BlockAddr::default(); capacity],
            tail: 0,
            full: false,
            mask: capacity - 1,
        })
    }

    /// Records a miss at the tail and advances the tail.
    ///
    /// Overwrites whatever was previously stored in that slot.
    #[inline]
    pub fn append(&mut self, addr: BlockAddr) {
        self.slots[self.tail] = addr;
        self.tail = (self.tail + 1) & self.mask;
        if self.tail == 0 {
            self.full = true;
        }
    }

    /// Number of valid entries: the capacity once full, otherwise the number of appends.
    #[inline]
    pub const fn size(&self) -> usize {
        if self.full { self.mask + 1 } else { self.tail }
    }

    /// Position the next append will write.
    #[inline]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Returns the address stored at logical slot `pos` (taken modulo the capacity).
    ///
    /// Reading a slot that has never been written is a usage error; debug
    /// builds assert on it.
    #[inline]
    pub fn at(&self, pos: usize) -> BlockAddr {
        let slot = pos & self.mask;
        debug_assert!(self.full || slot < self.tail, "read of unwritten log slot {slot}");
        self.slots[slot]
    }

    /// Maximum number of addresses retained.
    pub const fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Whether the log has wrapped at least once.
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// Whether nothing has been appended yet.
    pub const fn is_empty(&self) -> bool {
        !self.full && self.tail == 0
    }

    /// Number of entries after slot `base` that replay may read.
    ///
    /// Slots are taken linearly: `base + i + 1` is readable while it is below
    /// [`size`](Self::size). The walk never wraps past the end of the buffer,
    /// so a match in the last slot has no followers even when the log is full.
    ///
    /// # Arguments
    ///
    /// * `base` - A slot that has already been written.
    pub const fn followers_available(&self, base: usize) -> usize {
        self.size().saturating_sub((base & self.mask) + 1)
    }

    /// Iterates over up to `max` addresses logged after slot `base`, in slot order.
    ///
    /// Visits `at(base + i + 1)` for `i` in `0..max` while `base + i + 1 < size()`.
    pub fn successors(&self, base: usize, max: usize) -> impl Iterator<Item = BlockAddr> + '_ {
        let base = base & self.mask;
        let count = self.followers_available(base).min(max);
        self.slots[base + 1..base + 1 + count].iter().copied()
    }

    /// Forgets every recorded miss.
    pub fn reset(&mut self) {
        self.slots.fill(BlockAddr::default());
        self.tail = 0;
        self.full = false;
    }
}
