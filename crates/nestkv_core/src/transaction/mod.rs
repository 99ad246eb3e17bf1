//! Nested transactions.
//!
//! NestKV transactions are scopes on a stack rather than handles:
//! - **Isolation**: writes land in the innermost overlay and are invisible
//!   to reads until the outermost commit
//! - **Nesting**: committing a child folds its overlay into the parent
//! - **Atomic rollback**: popping an overlay discards every write in it

mod overlay;
mod stack;

pub use overlay::{Overlay, PendingWrite};
pub use stack::TransactionStack;
