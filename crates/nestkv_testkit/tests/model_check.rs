//! Randomized differential tests: store vs. reference model.

use nestkv_core::DeleteMode;
use nestkv_testkit::prelude::*;
use proptest::prelude::*;

const KEYS: &[&str] = &["a", "b", "c", "d", "e"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn store_matches_model_local_deletes(ops in ops_strategy(80)) {
        let mut harness = ScenarioHarness::new(DeleteMode::Local);
        harness.run(&ops);
        harness.settle(KEYS);
    }

    #[test]
    fn store_matches_model_tombstone_deletes(ops in ops_strategy(80)) {
        let mut harness = ScenarioHarness::new(DeleteMode::Tombstone);
        harness.run(&ops);
        harness.settle(KEYS);
    }

    #[test]
    fn depth_tracks_unmatched_begins(ops in ops_strategy(120)) {
        let mut store = TestStore::new();
        let mut open: usize = 0;

        for op in &ops {
            match op {
                Op::Begin => {
                    store.begin();
                    open += 1;
                }
                Op::Commit => {
                    let result = store.commit();
                    prop_assert_eq!(result.is_ok(), open > 0);
                    open = open.saturating_sub(1);
                }
                Op::Rollback => {
                    let result = store.rollback();
                    prop_assert_eq!(result.is_ok(), open > 0);
                    open = open.saturating_sub(1);
                }
                _ => {}
            }
            prop_assert_eq!(store.depth(), open);
        }
    }

    #[test]
    fn rollback_restores_committed_view(
        setup in prop::collection::vec((key_strategy(), value_strategy()), 0..10),
        ops in ops_strategy(60),
    ) {
        let mut store = TestStore::new();
        for (key, value) in &setup {
            store.put(key.as_str(), *value, None);
        }
        let before: Vec<_> = KEYS.iter().map(|k| store.get(k)).collect();

        // Everything below happens inside one scope that is rolled back.
        store.begin();
        for op in &ops {
            match op {
                Op::Put { key, value, .. } => store.put(key.as_str(), *value, None),
                Op::Delete { key } => store.delete(key),
                Op::Begin => store.begin(),
                Op::Commit if store.depth() > 1 => store.commit().unwrap(),
                Op::Rollback if store.depth() > 1 => store.rollback().unwrap(),
                _ => {}
            }
        }
        while store.depth() > 0 {
            store.rollback().unwrap();
        }

        let after: Vec<_> = KEYS.iter().map(|k| store.get(k)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn nested_commit_publishes_arbitrary_keys(
        writes in prop::collection::hash_map(wide_key_strategy(), value_strategy(), 1..20),
    ) {
        let mut store = TestStore::new();
        store.begin();
        store.begin();
        for (key, value) in &writes {
            store.put(key.as_str(), *value, None);
        }
        store.commit().unwrap();
        for key in writes.keys() {
            prop_assert!(store.get(key).is_err());
        }
        store.commit().unwrap();

        for (key, value) in &writes {
            prop_assert_eq!(store.get(key), Ok(*value));
        }
        prop_assert_eq!(store.len(), writes.len());
    }
}
