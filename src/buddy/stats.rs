//! Statistics and debugging for the buddy pool
//!
//! Provides fragmentation snapshots, optional request counters and failure reporting.

#[cfg(feature = "tracking")]
use super::buddy_pool::AllocationOutcome;
use super::size_class::ClassState;

/// Fragmentation snapshot of a pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub pool_size: u64,
    pub free_units: u64,
    pub used_units: u64,
    pub free_blocks: usize,
    /// Size of the largest free block, 0 when nothing is free
    pub largest_free_block: u64,
}

impl PoolStats {
    /// Build a snapshot from the per-class report
    pub fn from_classes<I>(pool_size: u64, classes: I) -> Self
    where
        I: IntoIterator<Item = ClassState>,
    {
        let mut stats = Self {
            pool_size,
            ..Self::default()
        };
        for class in classes {
            stats.free_units += class.free_units();
            stats.free_blocks += class.free_count;
            if class.free_count > 0 {
                stats.largest_free_block = stats.largest_free_block.max(class.block_size);
            }
        }
        stats.used_units = pool_size - stats.free_units;
        stats
    }

    /// True once no request of any size can be served
    pub fn is_exhausted(&self) -> bool {
        self.free_blocks == 0
    }
}

/// Per-request counters
#[cfg(feature = "tracking")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub requests: usize,
    pub granted: usize,
    pub unsatisfiable: usize,
    pub rejected: usize,
    /// Units actually handed out, `2^needed_class` per granted request
    pub carved_units: u64,
}

#[cfg(feature = "tracking")]
impl RequestStats {
    pub const fn new() -> Self {
        Self {
            requests: 0,
            granted: 0,
            unsatisfiable: 0,
            rejected: 0,
            carved_units: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: &AllocationOutcome) {
        self.requests += 1;
        match outcome {
            AllocationOutcome::Allocated { .. } => {
                self.granted += 1;
                self.carved_units += outcome.carved_size();
            }
            AllocationOutcome::Unsatisfiable => self.unsatisfiable += 1,
        }
    }

    pub(crate) fn record_rejected(&mut self) {
        self.requests += 1;
        self.rejected += 1;
    }
}

/// Detailed memory statistics reporter
pub struct MemoryStatsReporter;

impl MemoryStatsReporter {
    /// Log the pool state after a request could not be served
    /// This is a standalone function to keep allocation logic clean
    #[allow(unused_variables)]
    pub fn print_unsatisfiable_stats<I>(stats: &PoolStats, classes: I, job_size: i64, unit: &str)
    where
        I: IntoIterator<Item = ClassState>,
    {
        #[cfg(feature = "log")]
        use log::error;
        error!("========================================");
        error!("Request: {} {} (no suitable block)", job_size, unit);
        error!("Pool State:");
        error!("  Pool size: {} {}", stats.pool_size, unit);
        error!("  Free: {} {}", stats.free_units, unit);
        error!("  Used: {} {}", stats.used_units, unit);
        error!(
            "  Largest free block: {} {}",
            stats.largest_free_block, unit
        );
        error!("  Free blocks by class:");

        for class in classes {
            if class.free_count > 0 {
                error!(
                    "    Order {}: {} blocks ({} {} each, {} {} total)",
                    class.order,
                    class.free_count,
                    class.block_size,
                    unit,
                    class.free_units(),
                    unit
                );
            }
        }
        error!("========================================");
    }
}
