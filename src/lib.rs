//! Buddy pool allocator
//!
//! A power-of-two buddy allocator over a single fixed-size arena:
//! - One free counter per size class, no per-block bookkeeping
//! - Best-fit ascending scan with recursive halving on allocation
//! - Fragmentation report per size class
//! - A headless session driver with injected I/O
//!
//! Blocks are never returned to the pool, so there is no coalescing.

#![no_std]

extern crate alloc;

use core::fmt;

// Logging support - conditionally import log crate
#[cfg(feature = "log")]
extern crate log;

// Stub macros when log is disabled - these become no-ops
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! error {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! info {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Capacity used by the interactive driver when none is given
pub const DEFAULT_POOL_CAPACITY: i64 = 1024;

/// Unit label printed next to every size
pub const DEFAULT_UNIT: &str = "KB";

/// The error type used by the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Requested capacity is not positive (or too large to round up).
    InvalidCapacity,
    /// Requested job size is zero or negative.
    InvalidRequestSize,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidCapacity => f.write_str("pool capacity must be a positive integer"),
            PoolError::InvalidRequestSize => f.write_str("job size must be a positive integer"),
        }
    }
}

/// A [`Result`] type with [`PoolError`] as the error type.
pub type PoolResult<T = ()> = Result<T, PoolError>;

pub mod buddy;
#[cfg(feature = "tracking")]
pub use buddy::RequestStats;
pub use buddy::{AllocationOutcome, BuddyPool, ClassState, MemoryStatsReporter, PoolStats};

pub mod session;
pub use session::{Control, Session, SessionConfig};
