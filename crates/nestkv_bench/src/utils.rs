//! Benchmark utilities.

use nestkv_core::Store;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key:{i:08}")).collect()
}

/// Build a store with `count` committed keys, each holding its index.
pub fn populated_store(count: usize) -> (Store, Vec<String>) {
    let keys = generate_keys(count);
    let mut store = Store::new();
    for (i, key) in keys.iter().enumerate() {
        store.put(key.as_str(), i as i64, None);
    }
    (store, keys)
}
