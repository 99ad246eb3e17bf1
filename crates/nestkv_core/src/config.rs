//! Store configuration.

/// How `delete` behaves while a transaction is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Remove only the pending write in the current overlay.
    ///
    /// A value from an enclosing scope is not masked, so
    /// delete-then-commit leaves the outer value untouched.
    #[default]
    Local,
    /// Record a tombstone in the current overlay.
    ///
    /// On commit the tombstone removes the key from the parent scope
    /// (or from the committed space for the outermost transaction).
    Tombstone,
}

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Delete semantics inside transactions.
    pub delete_mode: DeleteMode,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delete semantics inside transactions.
    #[must_use]
    pub const fn delete_mode(mut self, mode: DeleteMode) -> Self {
        self.delete_mode = mode;
        self
    }
}
