//! Benchmark support for NestKV.

pub mod utils;
