//! Interactive session over a buddy pool.
//!
//! Reads one job size per line, allocates it, and prints the outcome followed
//! by the pool state. Input and output are injected so the whole dialogue can
//! run headless.

use core::fmt::{self, Write};

#[cfg(feature = "log")]
use crate::buddy::MemoryStatsReporter;
use crate::buddy::{AllocationOutcome, BuddyPool};
use crate::{PoolResult, DEFAULT_POOL_CAPACITY, DEFAULT_UNIT};

#[cfg(feature = "log")]
use log::{debug, info, warn};

/// Session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Requested pool capacity, rounded up to a power of two
    pub capacity: i64,
    /// Unit label printed after every size
    pub unit: &'static str,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_POOL_CAPACITY,
            unit: DEFAULT_UNIT,
        }
    }
}

/// What the caller should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Line-driven front end owning one pool and one output sink
pub struct Session<W: Write> {
    pool: BuddyPool,
    unit: &'static str,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: SessionConfig, out: W) -> PoolResult<Self> {
        let pool = BuddyPool::new(config.capacity).map_err(|err| {
            warn!("session: rejected capacity {}: {}", config.capacity, err);
            err
        })?;
        info!(
            "session: requested {} {}, pool size {} {} ({} classes)",
            config.capacity,
            config.unit,
            pool.pool_size(),
            config.unit,
            pool.order_count()
        );
        Ok(Self {
            pool,
            unit: config.unit,
            out,
        })
    }

    pub fn pool(&self) -> &BuddyPool {
        &self.pool
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until a `0` line or end of input.
    pub fn run<I, S>(&mut self, lines: I) -> fmt::Result
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        writeln!(
            self.out,
            "Initial Memory Size: {} {}",
            self.pool.pool_size(),
            self.unit
        )?;

        let mut lines = lines.into_iter();
        loop {
            write!(self.out, "\nEnter job size (in {}, or 0 to exit): ", self.unit)?;
            let Some(line) = lines.next() else {
                break;
            };
            if self.handle_line(line.as_ref())? == Control::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Handle a single line of input.
    ///
    /// The line must hold nothing but the integer; surrounding whitespace is
    /// rejected as wrong input.
    #[allow(unused_variables)]
    pub fn handle_line(&mut self, line: &str) -> Result<Control, fmt::Error> {
        let job_size = match line.parse::<i64>() {
            Ok(size) => size,
            Err(_) => {
                writeln!(self.out, "Wrong input. Please enter a valid integer.")?;
                return Ok(Control::Continue);
            }
        };

        if job_size == 0 {
            return Ok(Control::Exit);
        }

        let outcome = match self.pool.allocate(job_size) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("session: rejected job size {}: {}", job_size, err);
                writeln!(self.out, "Invalid job size. Must be a positive number.")?;
                return Ok(Control::Continue);
            }
        };

        writeln!(self.out, "Processing request for {} {}...", job_size, self.unit)?;
        match outcome {
            AllocationOutcome::Allocated {
                granted_class,
                size,
                needed_class,
            } => {
                debug!(
                    "session: {} {} served from class {}, carved class {}",
                    job_size, self.unit, granted_class, needed_class
                );
                writeln!(self.out, "Allocated Block of size: {} {}", size, self.unit)?;
                self.write_state()?;
            }
            AllocationOutcome::Unsatisfiable => {
                writeln!(
                    self.out,
                    "Can't allocate low memory. No suitable block found."
                )?;
                #[cfg(feature = "log")]
                MemoryStatsReporter::print_unsatisfiable_stats(
                    &self.pool.stats(),
                    self.pool.describe(),
                    job_size,
                    self.unit,
                );
            }
        }
        Ok(Control::Continue)
    }

    /// Print every size class with its free count.
    pub fn write_state(&mut self) -> fmt::Result {
        writeln!(self.out, "\nCurrent Memory State:")?;
        for class in self.pool.describe() {
            if class.free_count > 0 {
                writeln!(
                    self.out,
                    "{} block(s) of size {} {} (free)",
                    class.free_count, class.block_size, self.unit
                )?;
            } else {
                writeln!(
                    self.out,
                    "0 block(s) of size {} {} (allocated)",
                    class.block_size, self.unit
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn session(capacity: i64) -> Session<String> {
        let config = SessionConfig {
            capacity,
            ..SessionConfig::default()
        };
        Session::new(config, String::new()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.unit, "KB");
    }

    #[test]
    fn test_zero_exits() {
        let mut s = session(8);
        assert_eq!(s.handle_line("0").unwrap(), Control::Exit);
        assert!(s.output().is_empty());
    }

    #[test]
    fn test_padded_input_is_wrong_input() {
        let mut s = session(8);
        assert_eq!(s.handle_line(" 0").unwrap(), Control::Continue);
        assert_eq!(s.handle_line("5 ").unwrap(), Control::Continue);
        assert_eq!(
            s.output().as_str(),
            "Wrong input. Please enter a valid integer.\n\
             Wrong input. Please enter a valid integer.\n"
        );
        assert_eq!(s.pool().free_count(3), Some(1));
    }

    #[test]
    fn test_non_integer_input() {
        let mut s = session(8);
        assert_eq!(s.handle_line("abc").unwrap(), Control::Continue);
        assert_eq!(s.handle_line("2.5").unwrap(), Control::Continue);
        assert_eq!(
            s.output().as_str(),
            "Wrong input. Please enter a valid integer.\n\
             Wrong input. Please enter a valid integer.\n"
        );
    }

    #[test]
    fn test_negative_input() {
        let mut s = session(8);
        s.handle_line("-5").unwrap();
        assert_eq!(
            s.output().as_str(),
            "Invalid job size. Must be a positive number.\n"
        );
        assert_eq!(s.pool().free_count(3), Some(1));
    }

    #[test]
    fn test_allocation_prints_state() {
        let mut s = session(4);
        s.handle_line("1").unwrap();
        assert_eq!(
            s.output().as_str(),
            "Processing request for 1 KB...\n\
             Allocated Block of size: 4 KB\n\
             \n\
             Current Memory State:\n\
             1 block(s) of size 1 KB (free)\n\
             1 block(s) of size 2 KB (free)\n\
             0 block(s) of size 4 KB (allocated)\n"
        );
    }

    #[test]
    fn test_unsatisfiable_skips_state() {
        let mut s = session(2);
        s.handle_line("2").unwrap();
        let printed = s.output().len();
        s.handle_line("1").unwrap();
        assert_eq!(
            &s.output()[printed..],
            "Processing request for 1 KB...\n\
             Can't allocate low memory. No suitable block found.\n"
        );
    }
}
