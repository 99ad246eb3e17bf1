//! Command execution against a store.

use crate::commands::parse::Command;
use clap::ValueEnum;
use nestkv_core::Store;
use std::fmt;
use std::time::Duration;

/// Output format for structured replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `name: value` lines.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// The outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command succeeded with nothing to report.
    Ok,
    /// A stored value.
    Value(i64),
    /// `1` or `0`.
    Flag(bool),
    /// A count (depth, purged keys).
    Count(usize),
    /// Remaining lifetime; `None` prints as `-1`.
    Ttl(Option<Duration>),
    /// Preformatted output.
    Text(String),
    /// The command failed.
    Error(String),
    /// The session should end.
    Exit,
}

impl Reply {
    /// Returns `true` for failures.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Flag(b) => write!(f, "{}", u8::from(*b)),
            Self::Count(n) => write!(f, "{n}"),
            Self::Ttl(Some(left)) => write!(f, "{}", left.as_millis()),
            Self::Ttl(None) => write!(f, "-1"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Error(msg) => write!(f, "ERR {msg}"),
            Self::Exit => write!(f, "BYE"),
        }
    }
}

/// A store plus presentation settings.
#[derive(Debug)]
pub struct Session {
    store: Store,
    format: OutputFormat,
}

impl Session {
    /// Creates a session over `store`.
    pub fn new(store: Store, format: OutputFormat) -> Self {
        Self { store, format }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Executes one command.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Put { key, value, ttl } => {
                self.store.put(key, value, ttl);
                Reply::Ok
            }
            Command::Get(key) => match self.store.get(&key) {
                Ok(value) => Reply::Value(value),
                Err(err) => Reply::Error(err.to_string()),
            },
            Command::Delete(key) => {
                self.store.delete(&key);
                Reply::Ok
            }
            Command::Exists(key) => Reply::Flag(self.store.exists(&key)),
            Command::Ttl(key) => match self.store.ttl(&key) {
                Ok(left) => Reply::Ttl(left),
                Err(err) => Reply::Error(err.to_string()),
            },
            Command::Begin => {
                self.store.begin();
                Reply::Ok
            }
            Command::Commit => match self.store.commit() {
                Ok(()) => Reply::Ok,
                Err(err) => Reply::Error(err.to_string()),
            },
            Command::Rollback => match self.store.rollback() {
                Ok(()) => Reply::Ok,
                Err(err) => Reply::Error(err.to_string()),
            },
            Command::Depth => Reply::Count(self.store.depth()),
            Command::Purge => Reply::Count(self.store.purge_expired()),
            Command::Stats => self.render_stats(),
            Command::Exit => Reply::Exit,
        }
    }

    fn render_stats(&self) -> Reply {
        let stats = self.store.stats();
        let value = match serde_json::to_value(&stats) {
            Ok(value) => value,
            Err(err) => return Reply::Error(format!("cannot render stats: {err}")),
        };

        match self.format {
            OutputFormat::Json => Reply::Text(value.to_string()),
            OutputFormat::Text => {
                let lines: Vec<String> = value
                    .as_object()
                    .map(|fields| {
                        fields
                            .iter()
                            .map(|(name, count)| format!("{name}: {count}"))
                            .collect()
                    })
                    .unwrap_or_default();
                Reply::Text(lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestkv_core::{Config, DeleteMode};

    fn session() -> Session {
        Session::new(Store::new(), OutputFormat::Text)
    }

    fn put(key: &str, value: i64) -> Command {
        Command::Put {
            key: key.into(),
            value,
            ttl: None,
        }
    }

    #[test]
    fn get_reports_missing_as_error() {
        let mut s = session();
        let reply = s.execute(Command::Get("nope".into()));
        assert_eq!(reply.to_string(), "ERR value not found: nope");
        assert!(reply.is_error());
    }

    #[test]
    fn transaction_flow() {
        let mut s = session();
        assert_eq!(s.execute(put("k", 1)), Reply::Ok);
        assert_eq!(s.execute(Command::Begin), Reply::Ok);
        assert_eq!(s.execute(put("k", 2)), Reply::Ok);
        assert_eq!(s.execute(Command::Get("k".into())), Reply::Value(1));
        assert_eq!(s.execute(Command::Depth), Reply::Count(1));
        assert_eq!(s.execute(Command::Commit), Reply::Ok);
        assert_eq!(s.execute(Command::Get("k".into())), Reply::Value(2));
        assert_eq!(
            s.execute(Command::Rollback).to_string(),
            "ERR no active transaction"
        );
    }

    #[test]
    fn exists_and_ttl_replies() {
        let mut s = session();
        s.execute(put("k", 1));
        assert_eq!(s.execute(Command::Exists("k".into())).to_string(), "1");
        assert_eq!(s.execute(Command::Exists("x".into())).to_string(), "0");
        assert_eq!(s.execute(Command::Ttl("k".into())).to_string(), "-1");
    }

    #[test]
    fn tombstone_store_through_session() {
        let store = Store::with_config(Config::new().delete_mode(DeleteMode::Tombstone));
        let mut s = Session::new(store, OutputFormat::Text);
        assert_eq!(s.store().config().delete_mode, DeleteMode::Tombstone);
        s.execute(put("k", 1));
        s.execute(Command::Begin);
        s.execute(Command::Delete("k".into()));
        s.execute(Command::Commit);
        assert!(s.execute(Command::Get("k".into())).is_error());
    }

    #[test]
    fn stats_render_in_both_formats() {
        let mut s = session();
        s.execute(put("k", 1));
        let text = s.execute(Command::Stats).to_string();
        assert!(text.contains("writes: 1"));

        let mut s = Session::new(Store::new(), OutputFormat::Json);
        s.execute(put("k", 1));
        let json = s.execute(Command::Stats).to_string();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["writes"], 1);
    }
}
