//! Test fixtures and store helpers.
//!
//! Every fixture store runs on a [`ManualClock`] so TTL behavior is
//! deterministic.

use nestkv_core::{Config, DeleteMode, ManualClock, Store};
use std::sync::Arc;
use std::time::Duration;

/// A store paired with the clock that drives it.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// The clock the store reads.
    pub clock: Arc<ManualClock>,
}

impl TestStore {
    /// Creates a store with default configuration at time zero.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a store that records tombstones for transactional deletes.
    pub fn tombstones() -> Self {
        Self::with_config(Config::new().delete_mode(DeleteMode::Tombstone))
    }

    /// Creates a store with the given configuration at time zero.
    pub fn with_config(config: Config) -> Self {
        let clock = Arc::new(ManualClock::new());
        Self {
            store: Store::with_clock(config, clock.clone()),
            clock,
        }
    }

    /// Moves the store's clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Moves the store's clock forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Runs a test with a fresh manual-clock store.
pub fn with_test_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut Store) -> R,
{
    let mut test_store = TestStore::new();
    f(&mut test_store.store)
}

/// Runs a test with a fresh store and a handle to its clock.
pub fn with_clocked_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut Store, &ManualClock) -> R,
{
    let mut test_store = TestStore::new();
    f(&mut test_store.store, &test_store.clock)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a store with `count` committed keys `key0..key{count-1}`,
    /// where `key{i}` holds `i`.
    pub fn populated_store(count: usize) -> TestStore {
        let mut test_store = TestStore::new();
        for i in 0..count {
            test_store.put(format!("key{i}"), i as i64, None);
        }
        test_store
    }

    /// Creates a store with `depth` open transactions, each holding one
    /// write of `level` to the key `"level"`.
    pub fn nested_store(depth: usize) -> TestStore {
        let mut test_store = TestStore::new();
        for level in 0..depth {
            test_store.begin();
            test_store.put("level", level as i64, None);
        }
        test_store
    }
}
