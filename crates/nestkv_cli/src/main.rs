//! NestKV CLI
//!
//! Command-line front end for an in-memory NestKV store.
//!
//! # Commands
//!
//! - `shell` - Read commands from stdin, one reply per line
//! - `run` - Execute a script file
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use commands::session::{OutputFormat, Session};
use nestkv_core::{Config, DeleteMode, Store};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// NestKV command-line tools.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Record deletes inside transactions as tombstones
    #[arg(global = true, long)]
    tombstones: bool,

    /// Output format for STATS and run summaries
    #[arg(global = true, short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin
    Shell,

    /// Execute commands from a script file
    Run {
        /// Script to execute
        file: PathBuf,

        /// Stop at the first failing command
        #[arg(short, long)]
        stop_on_error: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so replies on stdout stay machine-readable.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let delete_mode = if cli.tombstones {
        DeleteMode::Tombstone
    } else {
        DeleteMode::Local
    };
    let store = Store::with_config(Config::new().delete_mode(delete_mode));
    let mut session = Session::new(store, cli.format);
    debug!(delete_mode = ?session.store().config().delete_mode, "store ready");

    match cli.command {
        Commands::Shell => {
            commands::shell::run(&mut session)?;
        }
        Commands::Run {
            file,
            stop_on_error,
        } => {
            let summary = commands::script::run(&file, &mut session, stop_on_error, cli.format)?;
            if stop_on_error && summary.errors > 0 {
                return Err("script stopped at a failing command".into());
            }
        }
        Commands::Version => {
            println!("NestKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("NestKV Core v{}", nestkv_core::VERSION);
        }
    }

    Ok(())
}
