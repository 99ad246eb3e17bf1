//! Shell command parsing.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while parsing a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// The first word is not a known command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command} requires {expected}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// What the command expects.
        expected: &'static str,
    },

    /// More arguments than the command accepts.
    #[error("too many arguments for {0}")]
    TooManyArguments(&'static str),

    /// An argument that should be an integer is not.
    #[error("invalid {what} '{input}'")]
    InvalidNumber {
        /// Which argument failed.
        what: &'static str,
        /// The text that failed to parse.
        input: String,
    },
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `PUT <key> <value> [ttl_ms]`
    Put {
        /// Key to write.
        key: String,
        /// Value to write.
        value: i64,
        /// Optional time-to-live.
        ttl: Option<Duration>,
    },
    /// `GET <key>`
    Get(String),
    /// `DEL <key>`
    Delete(String),
    /// `EXISTS <key>`
    Exists(String),
    /// `TTL <key>`
    Ttl(String),
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `DEPTH`
    Depth,
    /// `PURGE`
    Purge,
    /// `STATS`
    Stats,
    /// `EXIT` or `QUIT`
    Exit,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments. Command names are
/// case-insensitive; keys are taken verbatim.
pub fn parse_line(line: &str) -> Result<Option<Command>, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default().to_uppercase();
    let args: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "PUT" | "SET" => parse_put(&args)?,
        "GET" => Command::Get(single_key("GET", &args)?),
        "DEL" | "DELETE" => Command::Delete(single_key("DEL", &args)?),
        "EXISTS" => Command::Exists(single_key("EXISTS", &args)?),
        "TTL" => Command::Ttl(single_key("TTL", &args)?),
        "BEGIN" => no_args("BEGIN", &args, Command::Begin)?,
        "COMMIT" => no_args("COMMIT", &args, Command::Commit)?,
        "ROLLBACK" | "ABORT" => no_args("ROLLBACK", &args, Command::Rollback)?,
        "DEPTH" => no_args("DEPTH", &args, Command::Depth)?,
        "PURGE" => no_args("PURGE", &args, Command::Purge)?,
        "STATS" => no_args("STATS", &args, Command::Stats)?,
        "EXIT" | "QUIT" => Command::Exit,
        _ => return Err(ShellError::UnknownCommand(name)),
    };
    Ok(Some(command))
}

fn parse_put(args: &[&str]) -> Result<Command, ShellError> {
    let (key, value, ttl) = match args {
        [key, value] => (key, value, None),
        [key, value, ttl] => (key, value, Some(ttl)),
        [] | [_] => {
            return Err(ShellError::MissingArgument {
                command: "PUT",
                expected: "a key and a value",
            })
        }
        _ => return Err(ShellError::TooManyArguments("PUT")),
    };

    let value = value.parse::<i64>().map_err(|_| ShellError::InvalidNumber {
        what: "value",
        input: (*value).to_string(),
    })?;

    let ttl = ttl
        .map(|ms| {
            ms.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ShellError::InvalidNumber {
                    what: "ttl",
                    input: (*ms).to_string(),
                })
        })
        .transpose()?;

    Ok(Command::Put {
        key: (*key).to_string(),
        value,
        ttl,
    })
}

fn single_key(command: &'static str, args: &[&str]) -> Result<String, ShellError> {
    match args {
        [key] => Ok((*key).to_string()),
        [] => Err(ShellError::MissingArgument {
            command,
            expected: "a key",
        }),
        _ => Err(ShellError::TooManyArguments(command)),
    }
}

fn no_args(command: &'static str, args: &[&str], parsed: Command) -> Result<Command, ShellError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(ShellError::TooManyArguments(command))
    }
}
