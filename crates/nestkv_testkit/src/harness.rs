//! Differential test harness.
//!
//! Applies the same operations to a real [`Store`](nestkv_core::Store) and
//! to the [`ReferenceModel`], asserting that every observable result agrees.

use crate::fixtures::TestStore;
use crate::model::{Op, ReferenceModel};
use nestkv_core::{Config, DeleteMode};
use std::time::Duration;

/// Runs operations against a store and the reference model in lockstep.
pub struct ScenarioHarness {
    /// The store under test.
    pub store: TestStore,
    /// The reference model.
    pub model: ReferenceModel,
    applied: usize,
}

impl ScenarioHarness {
    /// Creates a harness for the given delete mode.
    pub fn new(delete_mode: DeleteMode) -> Self {
        Self {
            store: TestStore::with_config(Config::new().delete_mode(delete_mode)),
            model: ReferenceModel::new(delete_mode),
            applied: 0,
        }
    }

    /// Applies one operation to both sides and checks the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the store and the model disagree.
    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::Put { key, value, ttl_ms } => {
                self.store
                    .put(key.as_str(), *value, ttl_ms.map(Duration::from_millis));
                self.model.put(key, *value, *ttl_ms);
            }
            Op::Delete { key } => {
                self.store.delete(key);
                self.model.delete(key);
            }
            Op::Get { key } => {
                let actual = self.store.get(key);
                let expected = self.model.get(key);
                assert_eq!(
                    actual, expected,
                    "get({key}) mismatch after {} ops",
                    self.applied
                );
            }
            Op::Begin => {
                self.store.begin();
                self.model.begin();
            }
            Op::Commit => {
                let actual = self.store.commit();
                let expected = self.model.commit();
                assert_eq!(actual, expected, "commit mismatch after {} ops", self.applied);
            }
            Op::Rollback => {
                let actual = self.store.rollback();
                let expected = self.model.rollback();
                assert_eq!(
                    actual, expected,
                    "rollback mismatch after {} ops",
                    self.applied
                );
            }
            Op::Advance { ms } => {
                self.store.advance_ms(*ms);
                self.model.advance(*ms);
            }
        }

        self.applied += 1;
        assert_eq!(
            self.store.depth(),
            self.model.depth(),
            "depth mismatch after {} ops",
            self.applied
        );
    }

    /// Applies every operation in order.
    pub fn run(&mut self, ops: &[Op]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Commits every open scope, then checks that all keys read the same.
    pub fn settle(&mut self, keys: &[&str]) {
        while self.store.depth() > 0 {
            self.apply(&Op::Commit);
        }
        for key in keys {
            self.apply(&Op::Get {
                key: (*key).to_string(),
            });
        }
    }

    /// Returns the number of operations applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new(DeleteMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_counts_ops() {
        let mut harness = ScenarioHarness::default();
        harness.run(&[
            Op::Put {
                key: "k".into(),
                value: 1,
                ttl_ms: None,
            },
            Op::Begin,
            Op::Commit,
        ]);
        assert_eq!(harness.applied(), 3);
    }

    #[test]
    fn harness_settles_open_scopes() {
        let mut harness = ScenarioHarness::new(DeleteMode::Tombstone);
        harness.run(&[
            Op::Begin,
            Op::Put {
                key: "k".into(),
                value: 1,
                ttl_ms: None,
            },
            Op::Begin,
            Op::Delete { key: "k".into() },
        ]);
        harness.settle(&["k"]);
        assert_eq!(harness.store.depth(), 0);
    }
}
