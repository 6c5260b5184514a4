//! Allocate-only buddy pool
//!
//! Tracks the number of free blocks in every size class. There is no address
//! bookkeeping: the splitting discipline alone keeps the free blocks disjoint.

use alloc::vec;
use alloc::vec::Vec;

use crate::{PoolError, PoolResult};

use super::size_class::{class_size, order_for, ClassState};
#[cfg(feature = "tracking")]
use super::stats::RequestStats;
use super::stats::PoolStats;

/// Result of a single allocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// A free block was found and split down to the request.
    ///
    /// `size` is the size of the block found *before* splitting
    /// (`2^granted_class`), which is what gets reported to the user. The part
    /// actually handed out is `2^needed_class`, see [`Self::carved_size`].
    Allocated {
        granted_class: usize,
        size: u64,
        needed_class: usize,
    },
    /// No free block of sufficient size exists.
    Unsatisfiable,
}

impl AllocationOutcome {
    pub const fn is_allocated(&self) -> bool {
        matches!(self, AllocationOutcome::Allocated { .. })
    }

    /// Units removed from the pool by this request
    pub const fn carved_size(&self) -> u64 {
        match self {
            AllocationOutcome::Allocated { needed_class, .. } => class_size(*needed_class),
            AllocationOutcome::Unsatisfiable => 0,
        }
    }
}

/// A power-of-two buddy pool over one arena
///
/// Created once per session and mutated in place by every request.
#[derive(Debug, Clone)]
pub struct BuddyPool {
    pool_size: u64,
    /// Free blocks per order, index `i` holds blocks of `2^i` units
    free_count: Vec<usize>,
    #[cfg(feature = "tracking")]
    requests: RequestStats,
}

impl BuddyPool {
    /// Create a pool able to hold `requested_capacity` units.
    ///
    /// The capacity is rounded up to the next power of two and the whole arena
    /// starts as a single free block of that size.
    pub fn new(requested_capacity: i64) -> PoolResult<Self> {
        if requested_capacity <= 0 {
            return Err(PoolError::InvalidCapacity);
        }

        // i64::MAX rounds up to 2^63, which still fits in u64
        let pool_size = (requested_capacity as u64)
            .checked_next_power_of_two()
            .ok_or(PoolError::InvalidCapacity)?;
        let order_count = pool_size.trailing_zeros() as usize + 1;

        let mut free_count = vec![0; order_count];
        free_count[order_count - 1] = 1;

        Ok(Self {
            pool_size,
            free_count,
            #[cfg(feature = "tracking")]
            requests: RequestStats::new(),
        })
    }

    /// Total capacity, always a power of two
    pub fn pool_size(&self) -> u64 {
        self.pool_size
    }

    /// Number of size classes, `log2(pool_size) + 1`
    pub fn order_count(&self) -> usize {
        self.free_count.len()
    }

    /// Free blocks currently recorded for `order`, or `None` past the top class
    pub fn free_count(&self, order: usize) -> Option<usize> {
        self.free_count.get(order).copied()
    }

    /// Serve a request of `job_size` units.
    ///
    /// Scans classes upward from the smallest sufficient one, takes the first
    /// free block, and halves it until it reaches the needed class. Each halving
    /// leaves one buddy free at the lower class.
    pub fn allocate(&mut self, job_size: i64) -> PoolResult<AllocationOutcome> {
        if job_size <= 0 {
            #[cfg(feature = "tracking")]
            self.requests.record_rejected();
            return Err(PoolError::InvalidRequestSize);
        }

        let needed_class = order_for(job_size as u64);
        let outcome = match self.find_free_class(needed_class) {
            Some(found) => {
                self.take_and_split(found, needed_class);
                AllocationOutcome::Allocated {
                    granted_class: found,
                    size: class_size(found),
                    needed_class,
                }
            }
            None => AllocationOutcome::Unsatisfiable,
        };

        #[cfg(feature = "tracking")]
        self.requests.record(&outcome);

        Ok(outcome)
    }

    /// Smallest class at or above `needed_class` that has a free block
    fn find_free_class(&self, needed_class: usize) -> Option<usize> {
        // needed_class may exceed the top class; the range is empty then
        (needed_class..self.order_count()).find(|&order| self.free_count[order] > 0)
    }

    fn take_and_split(&mut self, found: usize, needed_class: usize) {
        self.free_count[found] -= 1;

        let mut order = found;
        while order > needed_class {
            order -= 1;
            self.free_count[order] += 1;
        }
    }

    /// Free block count for every class, ascending by block size
    pub fn describe(&self) -> impl ExactSizeIterator<Item = ClassState> + '_ {
        self.free_count
            .iter()
            .enumerate()
            .map(|(order, &count)| ClassState::new(order, count))
    }

    /// Snapshot of the current fragmentation state
    pub fn stats(&self) -> PoolStats {
        PoolStats::from_classes(self.pool_size, self.describe())
    }

    #[cfg(feature = "tracking")]
    pub fn request_stats(&self) -> RequestStats {
        self.requests
    }
}
