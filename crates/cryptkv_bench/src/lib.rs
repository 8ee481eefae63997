//! Shared helpers for cryptkv benchmarks.

pub mod utils;
