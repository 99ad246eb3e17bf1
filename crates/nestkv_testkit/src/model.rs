//! Reference model of the store semantics.
//!
//! The model keeps each open transaction as an ordered log of writes
//! rather than a map. Committing a child appends its log to the parent's;
//! committing the outermost scope replays the log into the committed map,
//! so the last write per key wins. It shares no code with the store.

use nestkv_core::{CoreError, CoreResult, DeleteMode, Value};
use std::collections::BTreeMap;

/// One store operation, as issued by tests and generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `put(key, value, ttl)`.
    Put {
        /// Key written.
        key: String,
        /// Value written.
        value: Value,
        /// Optional TTL in milliseconds.
        ttl_ms: Option<u64>,
    },
    /// `delete(key)`.
    Delete {
        /// Key deleted.
        key: String,
    },
    /// `get(key)`.
    Get {
        /// Key read.
        key: String,
    },
    /// `begin()`.
    Begin,
    /// `commit()`.
    Commit,
    /// `rollback()`.
    Rollback,
    /// Move the clock forward.
    Advance {
        /// Milliseconds to advance.
        ms: u64,
    },
}

#[derive(Debug, Clone)]
enum LoggedWrite {
    Put {
        key: String,
        value: Value,
        expires_at: Option<u64>,
    },
    Delete {
        key: String,
    },
}

impl LoggedWrite {
    fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// A deliberately naive implementation of the store semantics.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    delete_mode: DeleteMode,
    now: u64,
    committed: BTreeMap<String, (Value, Option<u64>)>,
    scopes: Vec<Vec<LoggedWrite>>,
}

impl ReferenceModel {
    /// Creates an empty model at time zero.
    pub fn new(delete_mode: DeleteMode) -> Self {
        Self {
            delete_mode,
            now: 0,
            committed: BTreeMap::new(),
            scopes: Vec::new(),
        }
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Moves model time forward.
    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Records a put.
    pub fn put(&mut self, key: &str, value: Value, ttl_ms: Option<u64>) {
        let expires_at = ttl_ms.map(|ttl| self.now.saturating_add(ttl));
        match self.scopes.last_mut() {
            Some(log) => log.push(LoggedWrite::Put {
                key: key.to_string(),
                value,
                expires_at,
            }),
            None => {
                self.committed.insert(key.to_string(), (value, expires_at));
            }
        }
    }

    /// Records a delete.
    pub fn delete(&mut self, key: &str) {
        match self.scopes.last_mut() {
            Some(log) => match self.delete_mode {
                DeleteMode::Local => log.retain(|w| w.key() != key),
                DeleteMode::Tombstone => log.push(LoggedWrite::Delete {
                    key: key.to_string(),
                }),
            },
            None => {
                self.committed.remove(key);
            }
        }
    }

    /// Reads a committed value, evicting it if expired.
    pub fn get(&mut self, key: &str) -> CoreResult<Value> {
        match self.committed.get(key).copied() {
            None => Err(CoreError::value_not_found(key)),
            Some((_, Some(expires_at))) if self.now > expires_at => {
                self.committed.remove(key);
                Err(CoreError::entry_expired(key))
            }
            Some((value, _)) => Ok(value),
        }
    }

    /// Opens a scope.
    pub fn begin(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Commits the innermost scope.
    pub fn commit(&mut self) -> CoreResult<()> {
        let log = self.scopes.pop().ok_or(CoreError::NoActiveTransaction)?;
        match self.scopes.last_mut() {
            Some(parent) => parent.extend(log),
            None => {
                for write in log {
                    match write {
                        LoggedWrite::Put {
                            key,
                            value,
                            expires_at,
                        } => {
                            self.committed.insert(key, (value, expires_at));
                        }
                        LoggedWrite::Delete { key } => {
                            self.committed.remove(&key);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Discards the innermost scope.
    pub fn rollback(&mut self) -> CoreResult<()> {
        self.scopes
            .pop()
            .map(|_| ())
            .ok_or(CoreError::NoActiveTransaction)
    }
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new(DeleteMode::default())
    }
}
