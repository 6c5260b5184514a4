//! Interactive buddy pool shell.
//!
//! Usage: `buddy-shell [CAPACITY]`, then one job size per line, `0` to quit.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use buddy_pool_allocator::{Session, SessionConfig};

/// Forwards formatted output to the buffered stdout handle
struct StdoutSink(io::Stdout);

impl fmt::Write for StdoutSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Input lines without their terminator
///
/// Flushes `prompt` before every read so the pending prompt is visible. Ends
/// at EOF or at the first I/O error, which is kept in `error`.
struct PromptedLines<R, P> {
    input: R,
    prompt: P,
    error: Option<io::Error>,
}

impl<R: BufRead, P: Write> PromptedLines<R, P> {
    fn new(input: R, prompt: P) -> Self {
        Self {
            input,
            prompt,
            error: None,
        }
    }
}

impl<R: BufRead, P: Write> Iterator for PromptedLines<R, P> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        if let Err(err) = self.prompt.flush() {
            self.error = Some(err);
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
                line.truncate(len);
                Some(line)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut config = SessionConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        config.capacity = arg
            .parse()
            .with_context(|| format!("invalid capacity {:?}", arg))?;
    }

    let mut session = Session::new(config, StdoutSink(io::stdout()))
        .map_err(|err| anyhow!("cannot create pool: {}", err))?;

    let mut lines = PromptedLines::new(io::stdin().lock(), io::stdout());
    session
        .run(&mut lines)
        .context("failed to write to stdout")?;
    if let Some(err) = lines.error {
        return Err(err).context("terminal I/O failed while reading a job size");
    }
    io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}
