//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that random sequences hit the
//! same keys across nested scopes often.

use crate::model::Op;
use proptest::prelude::*;

/// Strategy for keys from a small, collision-prone set.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_string)
}

/// Strategy for arbitrary (not collision-prone) keys.
pub fn wide_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_:.-]{0,31}").expect("Invalid regex")
}

/// Strategy for stored values.
pub fn value_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![any::<i64>(), -100i64..100]
}

/// Strategy for optional TTLs in milliseconds.
pub fn ttl_strategy() -> impl Strategy<Value = Option<u64>> {
    prop::option::weighted(0.3, 1u64..200)
}

/// Strategy for a single operation.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), ttl_strategy())
            .prop_map(|(key, value, ttl_ms)| Op::Put { key, value, ttl_ms }),
        2 => key_strategy().prop_map(|key| Op::Delete { key }),
        3 => key_strategy().prop_map(|key| Op::Get { key }),
        2 => Just(Op::Begin),
        2 => Just(Op::Commit),
        1 => Just(Op::Rollback),
        1 => (1u64..150).prop_map(|ms| Op::Advance { ms }),
    ]
}

/// Strategy for sequences of up to `max_len` operations.
pub fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}
