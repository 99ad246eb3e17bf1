//! # NestKV Testkit
//!
//! Test utilities for NestKV.
//!
//! This crate provides:
//! - Store fixtures driven by a manual clock
//! - Property-based operation generators using proptest
//! - A log-based reference model of the transaction semantics
//! - A harness that runs operations against both and compares results
//!
//! ## Usage
//!
//! ```rust
//! use nestkv_testkit::prelude::*;
//!
//! with_test_store(|store| {
//!     store.put("k", 1, None);
//!     assert_eq!(store.get("k"), Ok(1));
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use harness::*;
pub use model::*;
