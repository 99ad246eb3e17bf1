//! Interactive shell.

use crate::commands::runner::{run_lines, RunOptions};
use crate::commands::session::Session;
use std::io;
use tracing::info;

/// Reads commands from stdin until end of input or `EXIT`.
pub fn run(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = run_lines(session, stdin.lock(), &mut out, RunOptions::default())?;
    info!(
        executed = summary.executed,
        errors = summary.errors,
        open_transactions = summary.open_transactions,
        "shell closed"
    );
    Ok(())
}
