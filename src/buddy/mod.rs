//! Buddy pool module
//!
//! This module provides the allocate-only buddy system:
//! - Size class arithmetic
//! - The pool itself (free counters per class)
//! - Statistics and failure reporting

pub mod buddy_pool;
pub mod size_class;
pub mod stats;

pub use buddy_pool::{AllocationOutcome, BuddyPool};
pub use size_class::{class_size, order_for, ClassState};
#[cfg(feature = "tracking")]
pub use stats::RequestStats;
pub use stats::{MemoryStatsReporter, PoolStats};
