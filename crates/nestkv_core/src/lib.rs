//! # NestKV Core
//!
//! Core engine for NestKV, an in-process key-value store.
//!
//! This crate provides:
//! - A committed key space of integer values with optional TTL
//! - Nested transactions kept as a stack of write overlays
//! - Commit that folds a child scope into its parent, rollback that
//!   discards a whole scope
//! - Lazy expiry against an injectable [`Clock`]
//! - [`SharedStore`] for use across threads
//!
//! ## Example
//!
//! ```rust
//! use nestkv_core::{CoreError, Store};
//!
//! let mut store = Store::new();
//! store.put("k", 1, None);
//!
//! store.begin();
//! store.put("k", 10, None);
//! store.begin();
//! store.put("k", 20, None);
//! store.commit()?;
//! store.commit()?;
//!
//! assert_eq!(store.get("k"), Ok(20));
//! assert_eq!(store.depth(), 0);
//! # Ok::<(), CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod entry;
mod error;
mod shared;
mod stats;
mod store;
mod types;

pub mod transaction;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, DeleteMode};
pub use entry::Entry;
pub use error::{CoreError, CoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;
pub use transaction::{Overlay, PendingWrite, TransactionStack};
pub use types::{Timestamp, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
