//! Per-transaction write overlay.

use crate::entry::Entry;
use std::collections::hash_map::{self, HashMap};

/// A pending write held by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingWrite {
    /// Insert or replace the key.
    Put(Entry),
    /// Remove the key from the enclosing scope on commit.
    Delete,
}

/// The writes local to one open transaction.
///
/// A key absent from the overlay has no pending local write; it is not
/// deleted. Overlays are created on begin, merged on commit and dropped
/// on rollback.
#[derive(Debug, Default, Clone)]
pub struct Overlay {
    writes: HashMap<String, PendingWrite>,
}

impl Overlay {
    /// Creates an empty overlay.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a put, replacing any earlier pending write for the key.
    pub fn put(&mut self, key: impl Into<String>, entry: Entry) {
        self.writes.insert(key.into(), PendingWrite::Put(entry));
    }

    /// Records a tombstone for the key.
    pub fn tombstone(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), PendingWrite::Delete);
    }

    /// Drops the pending write for the key, if any.
    pub fn remove(&mut self, key: &str) -> Option<PendingWrite> {
        self.writes.remove(key)
    }

    /// Gets the pending write for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PendingWrite> {
        self.writes.get(key)
    }

    /// Returns the number of pending writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Returns `true` if the overlay holds no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Folds this overlay into an enclosing one. Child writes win.
    pub(crate) fn merge_into(self, parent: &mut Overlay) {
        parent.writes.extend(self.writes);
    }
}

impl IntoIterator for Overlay {
    type Item = (String, PendingWrite);
    type IntoIter = hash_map::IntoIter<String, PendingWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_overlay_is_empty() {
        let overlay = Overlay::new();
        assert!(overlay.is_empty());
        assert_eq!(overlay.write_count(), 0);
    }

    #[test]
    fn put_overwrites_previous() {
        let mut overlay = Overlay::new();
        overlay.put("k", Entry::new(1));
        overlay.put("k", Entry::new(2));

        assert_eq!(overlay.write_count(), 1);
        assert_eq!(overlay.get("k"), Some(&PendingWrite::Put(Entry::new(2))));
    }

    #[test]
    fn tombstone_replaces_put() {
        let mut overlay = Overlay::new();
        overlay.put("k", Entry::new(1));
        overlay.tombstone("k");

        assert!(matches!(overlay.get("k"), Some(PendingWrite::Delete)));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut overlay = Overlay::new();
        overlay.put("k", Entry::new(1));

        assert!(overlay.remove("k").is_some());
        assert!(overlay.remove("k").is_none());
        assert!(overlay.is_empty());
    }

    #[test]
    fn merge_child_wins() {
        let mut parent = Overlay::new();
        parent.put("shared", Entry::new(1));
        parent.put("parent_only", Entry::new(2));

        let mut child = Overlay::new();
        child.put("shared", Entry::new(10));
        child.tombstone("child_only");

        child.merge_into(&mut parent);

        assert_eq!(parent.write_count(), 3);
        assert_eq!(
            parent.get("shared"),
            Some(&PendingWrite::Put(Entry::new(10)))
        );
        assert_eq!(
            parent.get("parent_only"),
            Some(&PendingWrite::Put(Entry::new(2)))
        );
        assert_eq!(parent.get("child_only"), Some(&PendingWrite::Delete));
    }
}
