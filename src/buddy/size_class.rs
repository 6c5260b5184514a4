//! Size class arithmetic
//!
//! A size class is indexed by its order: class `i` holds blocks of `2^i` units.

/// Smallest order whose block can hold `size` units, i.e. `ceil(log2(size))`.
///
/// `size` must be at least 1 and at most `2^63`.
#[inline]
pub const fn order_for(size: u64) -> usize {
    debug_assert!(size >= 1);
    if size.is_power_of_two() {
        size.trailing_zeros() as usize
    } else {
        size.next_power_of_two().trailing_zeros() as usize
    }
}

/// Block size of the given order
#[inline]
pub const fn class_size(order: usize) -> u64 {
    1u64 << order
}

/// One row of the pool report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassState {
    pub order: usize,
    pub block_size: u64,
    pub free_count: usize,
}

impl ClassState {
    pub const fn new(order: usize, free_count: usize) -> Self {
        Self {
            order,
            block_size: class_size(order),
            free_count,
        }
    }

    /// Units held by the free blocks of this class
    pub const fn free_units(&self) -> u64 {
        self.block_size * self.free_count as u64
    }
}
