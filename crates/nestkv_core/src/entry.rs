//! Stored entries.

use crate::types::{Timestamp, Value};
use std::time::Duration;

/// A stored value plus an optional absolute expiry.
///
/// `expires_at == None` means the entry never expires. That is a separate
/// state from an entry whose expiry has already passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    value: Value,
    expires_at: Option<Timestamp>,
}

impl Entry {
    /// Creates an entry that never expires.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires at `expires_at`.
    #[must_use]
    pub const fn expiring_at(value: Value, expires_at: Timestamp) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    /// Creates an entry expiring `ttl` after `now`, or a non-expiring one
    /// when `ttl` is `None`.
    #[must_use]
    pub fn with_ttl(value: Value, now: Timestamp, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| now.saturating_add(ttl)),
        }
    }

    /// Returns the stored value.
    #[must_use]
    pub const fn value(&self) -> Value {
        self.value
    }

    /// Returns the absolute expiry, if any.
    #[must_use]
    pub const fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Returns `true` only if an expiry is set and `now` is strictly after it.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(at) => now > at,
            None => false,
        }
    }

    /// Time left before expiry; `None` for entries that never expire.
    #[must_use]
    pub fn remaining(&self, now: Timestamp) -> Option<Duration> {
        self.expires_at.map(|at| now.until(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn entry_without_expiry_never_expires() {
        let entry = Entry::new(7);
        assert!(!entry.is_expired(ts(0)));
        assert!(!entry.is_expired(ts(u64::MAX)));
        assert_eq!(entry.remaining(ts(10)), None);
    }

    #[test]
    fn expiry_is_strictly_after() {
        let entry = Entry::expiring_at(1, ts(100));
        assert!(!entry.is_expired(ts(99)));
        assert!(!entry.is_expired(ts(100)));
        assert!(entry.is_expired(ts(101)));
    }

    #[test]
    fn expiry_at_zero_is_distinct_from_none() {
        let expiring = Entry::expiring_at(1, ts(0));
        let forever = Entry::new(1);

        assert_ne!(expiring, forever);
        assert!(expiring.is_expired(ts(1)));
        assert!(!forever.is_expired(ts(1)));
    }

    #[test]
    fn with_ttl_offsets_from_now() {
        let entry = Entry::with_ttl(5, ts(1_000), Some(Duration::from_millis(50)));
        assert_eq!(entry.expires_at(), Some(ts(1_050)));
        assert_eq!(entry.value(), 5);

        let entry = Entry::with_ttl(5, ts(1_000), None);
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let entry = Entry::expiring_at(1, ts(100));
        assert_eq!(entry.remaining(ts(40)), Some(Duration::from_millis(60)));
        assert_eq!(entry.remaining(ts(100)), Some(Duration::ZERO));
        assert_eq!(entry.remaining(ts(500)), Some(Duration::ZERO));
    }
}
