//! Thread-safe store handle.

use crate::error::CoreResult;
use crate::stats::StatsSnapshot;
use crate::store::Store;
use crate::types::Value;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// A cloneable, thread-safe handle to one [`Store`].
///
/// The whole store (committed space and transaction stack) sits behind a
/// single mutex. Each method holds the lock for exactly one operation, so
/// individual calls are atomic with respect to each other. Use
/// [`SharedStore::with_lock`] when a sequence of calls must not interleave
/// with other threads, e.g. a begin/put/commit group.
///
/// The transaction stack is shared by every clone: a `begin` on one thread
/// opens a scope that another thread's `put` will write into.
///
/// ```rust
/// use nestkv_core::{SharedStore, Store};
/// use std::thread;
///
/// let shared = SharedStore::new(Store::new());
/// let writer = shared.clone();
///
/// thread::spawn(move || writer.put("k", 1, None)).join().unwrap();
/// assert_eq!(shared.get("k"), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps a store for shared use.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_lock<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Store) -> T,
    {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    /// See [`Store::put`].
    pub fn put(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        self.inner.lock().put(key, value, ttl);
    }

    /// See [`Store::delete`].
    pub fn delete(&self, key: &str) {
        self.inner.lock().delete(key);
    }

    /// See [`Store::get`].
    ///
    /// # Errors
    ///
    /// Same as [`Store::get`].
    pub fn get(&self, key: &str) -> CoreResult<Value> {
        self.inner.lock().get(key)
    }

    /// See [`Store::begin`].
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// See [`Store::commit`].
    ///
    /// # Errors
    ///
    /// Same as [`Store::commit`].
    pub fn commit(&self) -> CoreResult<()> {
        self.inner.lock().commit()
    }

    /// See [`Store::rollback`].
    ///
    /// # Errors
    ///
    /// Same as [`Store::rollback`].
    pub fn rollback(&self) -> CoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Runs `f` in a transaction while holding the lock throughout.
    ///
    /// # Errors
    ///
    /// Same as [`Store::transaction`].
    pub fn transaction<F, T>(&self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Store) -> CoreResult<T>,
    {
        self.inner.lock().transaction(f)
    }

    /// See [`Store::depth`].
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// See [`Store::stats`].
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats()
    }
}
