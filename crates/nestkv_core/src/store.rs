//! The key-value store facade.

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DeleteMode};
use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use crate::stats::{StatsSnapshot, StoreStats};
use crate::transaction::{Overlay, PendingWrite, TransactionStack};
use crate::types::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// An in-memory key-value store with nested transactions and TTL.
///
/// `Store` owns two things:
/// - the committed key space, which every read goes to
/// - a [`TransactionStack`] of overlays, which every write goes to while a
///   transaction is open
///
/// Reads never see uncommitted writes, including the writer's own. A value
/// written inside a transaction becomes readable only once the outermost
/// enclosing transaction commits.
///
/// Expired entries are evicted lazily, when a read touches them, or in bulk
/// through [`Store::purge_expired`].
///
/// # Example
///
/// ```rust
/// use nestkv_core::{CoreError, Store};
///
/// let mut store = Store::new();
/// store.put("balance", 100, None);
///
/// store.begin();
/// store.put("balance", 40, None);
/// assert_eq!(store.get("balance"), Ok(100));
/// store.commit()?;
///
/// assert_eq!(store.get("balance"), Ok(40));
/// assert_eq!(store.commit(), Err(CoreError::NoActiveTransaction));
/// # Ok::<(), CoreError>(())
/// ```
pub struct Store {
    config: Config,
    clock: Arc<dyn Clock>,
    /// Key space visible to readers.
    committed: HashMap<String, Entry>,
    /// Open transactions, innermost last.
    stack: TransactionStack,
    stats: StoreStats,
}

impl Store {
    /// Creates a store with default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a store with custom configuration and the system clock.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a store with custom configuration and time source.
    ///
    /// ```rust
    /// use nestkv_core::{Config, ManualClock, Store};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let clock = Arc::new(ManualClock::new());
    /// let mut store = Store::with_clock(Config::default(), clock.clone());
    ///
    /// store.put("session", 1, Some(Duration::from_millis(50)));
    /// clock.advance(Duration::from_millis(100));
    /// assert!(store.get("session").is_err());
    /// ```
    #[must_use]
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            committed: HashMap::new(),
            stack: TransactionStack::new(),
            stats: StoreStats::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.size()
    }

    /// Returns `true` if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Returns the transaction stack.
    #[must_use]
    pub fn transactions(&self) -> &TransactionStack {
        &self.stack
    }

    /// Returns the number of committed keys.
    ///
    /// Expired entries that no read has touched yet are still counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns `true` if the committed space holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Returns a snapshot of the store counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Writes a value, optionally expiring `ttl` from now.
    ///
    /// Lands in the innermost open transaction, or in the committed space
    /// when none is open. Replaces any earlier value for the key in that
    /// scope.
    pub fn put(&mut self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let key = key.into();
        let entry = Entry::with_ttl(value, self.clock.now(), ttl);
        self.stats.record_write();
        trace!(key = %key, value, ?ttl, depth = self.stack.size(), "put");

        match self.stack.peek_mut() {
            Some(overlay) => overlay.put(key, entry),
            None => {
                self.committed.insert(key, entry);
            }
        }
    }

    /// Deletes a key from the current scope.
    ///
    /// Deleting a key that the scope does not hold is a no-op. Inside a
    /// transaction the effect depends on [`DeleteMode`].
    pub fn delete(&mut self, key: &str) {
        self.stats.record_delete();
        trace!(key, depth = self.stack.size(), "delete");

        match self.stack.peek_mut() {
            Some(overlay) => match self.config.delete_mode {
                DeleteMode::Local => {
                    overlay.remove(key);
                }
                DeleteMode::Tombstone => overlay.tombstone(key),
            },
            None => {
                self.committed.remove(key);
            }
        }
    }

    /// Reads a committed value.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ValueNotFound`] if the key is not committed
    /// - [`CoreError::EntryExpired`] if its TTL has elapsed; the entry is
    ///   evicted, so the next read reports `ValueNotFound`
    pub fn get(&mut self, key: &str) -> CoreResult<Value> {
        self.stats.record_read();
        match self.read_committed(key) {
            Ok(entry) => Ok(entry.value()),
            Err(err) => {
                if matches!(err, CoreError::ValueNotFound { .. }) {
                    self.stats.record_read_miss();
                }
                self.fail("get", err)
            }
        }
    }

    /// Returns the remaining lifetime of a committed key.
    ///
    /// `Ok(None)` means the key never expires.
    ///
    /// # Errors
    ///
    /// Same as [`Store::get`], including the eviction of expired entries.
    pub fn ttl(&mut self, key: &str) -> CoreResult<Option<Duration>> {
        let now = self.clock.now();
        match self.read_committed(key) {
            Ok(entry) => Ok(entry.remaining(now)),
            Err(err) => self.fail("ttl", err),
        }
    }

    /// Returns `true` if a readable committed value exists for the key.
    ///
    /// Evicts the entry if it has expired. Misses are not logged.
    pub fn exists(&mut self, key: &str) -> bool {
        self.read_committed(key).is_ok()
    }

    /// Evicts every expired committed entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.committed.len();
        self.committed.retain(|_, entry| !entry.is_expired(now));
        let purged = before - self.committed.len();

        if purged > 0 {
            self.stats.record_expirations(purged as u64);
            debug!(purged, "purged expired entries");
        }
        purged
    }

    /// Opens a transaction nested inside the current one, if any.
    pub fn begin(&mut self) {
        self.stack.begin();
        self.stats.record_transaction_start();
        debug!(depth = self.stack.size(), "transaction begun");
    }

    /// Commits the innermost transaction.
    ///
    /// Its writes are folded into the enclosing transaction, or into the
    /// committed space if it was the outermost one. Per key, the committed
    /// child's write wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is open.
    pub fn commit(&mut self) -> CoreResult<()> {
        let overlay = match self.stack.pop() {
            Ok(overlay) => overlay,
            Err(_) => return self.fail("commit", CoreError::NoActiveTransaction),
        };
        let writes = overlay.write_count();

        match self.stack.peek_mut() {
            Some(parent) => overlay.merge_into(parent),
            None => apply_to_committed(&mut self.committed, overlay),
        }

        self.stats.record_transaction_commit();
        debug!(depth = self.stack.size(), writes, "transaction committed");
        Ok(())
    }

    /// Discards the innermost transaction and every write in it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is open.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let overlay = match self.stack.pop() {
            Ok(overlay) => overlay,
            Err(_) => return self.fail("rollback", CoreError::NoActiveTransaction),
        };

        self.stats.record_transaction_rollback();
        debug!(
            depth = self.stack.size(),
            discarded = overlay.write_count(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Runs `f` inside a new transaction.
    ///
    /// Commits if `f` returns `Ok`, rolls back if it returns `Err`. `f` may
    /// nest further transactions but must leave them balanced, since commit
    /// and rollback act on whatever scope is innermost.
    ///
    /// ```rust
    /// use nestkv_core::{CoreError, Store};
    ///
    /// let mut store = Store::new();
    /// let result: Result<(), CoreError> = store.transaction(|s| {
    ///     s.put("a", 1, None);
    ///     s.get("missing").map(|_| ())
    /// });
    ///
    /// assert!(result.is_err());
    /// assert!(!store.exists("a"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or [`CoreError::NoActiveTransaction`] if
    /// `f` closed more scopes than it opened.
    pub fn transaction<F, T>(&mut self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Store) -> CoreResult<T>,
    {
        self.begin();
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                self.rollback()?;
                Err(err)
            }
        }
    }

    /// Looks a key up in the committed space, evicting it if expired.
    fn read_committed(&mut self, key: &str) -> CoreResult<Entry> {
        let now = self.clock.now();
        match self.committed.get(key).copied() {
            None => Err(CoreError::value_not_found(key)),
            Some(entry) if entry.is_expired(now) => {
                self.committed.remove(key);
                self.stats.record_expirations(1);
                Err(CoreError::entry_expired(key))
            }
            Some(entry) => Ok(entry),
        }
    }

    /// Reports a failure to the log and the error counter.
    fn fail<T>(&self, op: &'static str, err: CoreError) -> CoreResult<T> {
        self.stats.record_error();
        warn!(op, error = %err, depth = self.stack.size(), "operation failed");
        Err(err)
    }
}

/// Applies an outermost overlay to the committed space.
fn apply_to_committed(committed: &mut HashMap<String, Entry>, overlay: Overlay) {
    for (key, write) in overlay {
        match write {
            PendingWrite::Put(entry) => {
                committed.insert(key, entry);
            }
            PendingWrite::Delete => {
                committed.remove(&key);
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("committed", &self.committed.len())
            .field("depth", &self.stack.size())
            .finish_non_exhaustive()
    }
}
