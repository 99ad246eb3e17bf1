//! CLI command implementations.

pub mod parse;
pub mod runner;
pub mod script;
pub mod session;
pub mod shell;
