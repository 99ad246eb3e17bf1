//! Script command implementation.

use crate::commands::runner::{run_lines, RunOptions, RunSummary};
use crate::commands::session::{OutputFormat, Session};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Runs the commands in `path` against the session.
pub fn run(
    path: &Path,
    session: &mut Session,
    stop_on_error: bool,
    format: OutputFormat,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("cannot open script {}: {e}", path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run_lines(
        session,
        BufReader::new(file),
        &mut out,
        RunOptions { stop_on_error },
    )?;

    if summary.open_transactions > 0 {
        warn!(
            open = summary.open_transactions,
            "script ended with open transactions; their writes are discarded"
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&summary)?),
        OutputFormat::Text => info!(
            executed = summary.executed,
            errors = summary.errors,
            "script finished"
        ),
    }

    Ok(summary)
}
