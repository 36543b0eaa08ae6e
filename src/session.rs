//! The read-dispatch-print loop.

use crate::commands::{dispatch, Command, Outcome};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::source::CommandSource;
use crate::transport::Transport;
use std::io::Write;
use tracing::debug;

/// Counters for one session, mostly useful to tests and the exit log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands that reached the server side (everything but quit and unknown keys).
    pub executed: usize,
    pub failed: usize,
    pub unrecognized: usize,
}

/// Runs commands one at a time against a shared transport.
pub struct Session<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: &'a ClientConfig,
}

impl<'a, T: Transport + ?Sized> Session<'a, T> {
    pub fn new(transport: &'a T, config: &'a ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Read keys until quit or end of input. Each command finishes, and its
    /// outcome is written to `out`, before the next key is read.
    pub async fn run<S, W>(&self, source: &mut S, out: &mut W) -> Result<SessionStats>
    where
        S: CommandSource + ?Sized,
        W: Write,
    {
        let mut stats = SessionStats::default();

        while let Some(key) = source.next_key().await? {
            if key.is_whitespace() {
                continue;
            }

            let command = Command::from_key(key);
            debug!(%key, ?command, "dispatching");
            let outcome = dispatch(command, self.transport, self.config).await;

            match &outcome {
                Outcome::Quit => break,
                Outcome::NotFound(_) => stats.unrecognized += 1,
                Outcome::Failed(_) => {
                    stats.executed += 1;
                    stats.failed += 1;
                }
                _ => stats.executed += 1,
            }

            writeln!(out, "{}", outcome)?;
            out.flush()?;
        }

        Ok(stats)
    }
}
