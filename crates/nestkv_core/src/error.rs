//! Error types for NestKV core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in NestKV core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Key is absent from the committed space.
    #[error("value not found: {key}")]
    ValueNotFound {
        /// The key that was looked up.
        key: String,
    },

    /// Key was present but its TTL had elapsed. The entry has been evicted.
    #[error("entry expired: {key}")]
    EntryExpired {
        /// The key that expired.
        key: String,
    },

    /// Commit or rollback was requested with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// Pop on an empty transaction stack.
    #[error("transaction stack is empty")]
    EmptyStack,
}

impl CoreError {
    /// Creates a value not found error.
    pub fn value_not_found(key: impl Into<String>) -> Self {
        Self::ValueNotFound { key: key.into() }
    }

    /// Creates an entry expired error.
    pub fn entry_expired(key: impl Into<String>) -> Self {
        Self::EntryExpired { key: key.into() }
    }
}
