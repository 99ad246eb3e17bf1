//! Line-by-line command runner shared by the shell and script commands.

use crate::commands::parse::parse_line;
use crate::commands::session::{Reply, Session};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Runner behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop at the first `ERR` reply.
    pub stop_on_error: bool,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commands executed (blank lines and comments excluded).
    pub executed: usize,
    /// Replies that were errors, including parse failures.
    pub errors: usize,
    /// Transactions still open when the run ended.
    pub open_transactions: usize,
    /// Whether the input ended with `EXIT`.
    pub exited: bool,
}

/// Reads commands from `input`, writing one reply per command to `output`.
///
/// # Errors
///
/// Returns an error only for I/O failures on `input` or `output`.
pub fn run_lines<R, W>(
    session: &mut Session,
    input: R,
    output: &mut W,
    options: RunOptions,
) -> io::Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let reply = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                debug!(line = idx + 1, ?command, "executing");
                session.execute(command)
            }
            Err(err) => Reply::Error(err.to_string()),
        };
        summary.executed += 1;

        writeln!(output, "{reply}")?;
        if reply == Reply::Exit {
            summary.exited = true;
            break;
        }

        if reply.is_error() {
            summary.errors += 1;
            if options.stop_on_error {
                debug!(line = idx + 1, "stopping at first error");
                break;
            }
        }
    }

    output.flush()?;
    summary.open_transactions = session.store().depth();
    Ok(summary)
}
