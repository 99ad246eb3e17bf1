//! Transaction stack.

use crate::error::{CoreError, CoreResult};
use crate::transaction::overlay::Overlay;

/// Strictly nested, in-flight transactions.
///
/// The last overlay is the innermost (active) transaction. Begin pushes,
/// and both commit and rollback pop; the size is the number of unmatched
/// begins.
#[derive(Debug, Default)]
pub struct TransactionStack {
    overlays: Vec<Overlay>,
}

impl TransactionStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active overlay, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    /// Returns the active overlay mutably, if any.
    pub fn peek_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.last_mut()
    }

    /// Pushes a new empty overlay and returns it.
    pub fn begin(&mut self) -> &mut Overlay {
        let top = self.overlays.len();
        self.overlays.push(Overlay::new());
        &mut self.overlays[top]
    }

    /// Removes and returns the active overlay.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyStack`] if no transaction is open.
    pub fn pop(&mut self) -> CoreResult<Overlay> {
        self.overlays.pop().ok_or(CoreError::EmptyStack)
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn size(&self) -> usize {
        self.overlays.len()
    }

    /// Returns `true` if no transaction is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    #[test]
    fn new_stack_is_empty() {
        let stack = TransactionStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.size(), 0);
        assert!(stack.peek().is_none());
    }

    #[test]
    fn begin_returns_new_top() {
        let mut stack = TransactionStack::new();
        stack.begin().put("outer", Entry::new(1));
        stack.begin().put("inner", Entry::new(2));

        assert_eq!(stack.size(), 2);
        let top = stack.peek().unwrap();
        assert!(top.get("inner").is_some());
        assert!(top.get("outer").is_none());
    }

    #[test]
    fn pop_is_lifo() {
        let mut stack = TransactionStack::new();
        stack.begin().put("first", Entry::new(1));
        stack.begin().put("second", Entry::new(2));

        let popped = stack.pop().unwrap();
        assert!(popped.get("second").is_some());
        assert_eq!(stack.size(), 1);

        let popped = stack.pop().unwrap();
        assert!(popped.get("first").is_some());
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_empty_fails() {
        let mut stack = TransactionStack::new();
        assert_eq!(stack.pop().unwrap_err(), CoreError::EmptyStack);
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn peek_mut_writes_to_top() {
        let mut stack = TransactionStack::new();
        stack.begin();
        stack.begin();
        stack.peek_mut().unwrap().put("k", Entry::new(3));

        let top = stack.pop().unwrap();
        let below = stack.pop().unwrap();
        assert_eq!(top.write_count(), 1);
        assert!(below.is_empty());
    }
}
