//! dotconf benchmarking suite
//!
//! Benchmarks for key resolution, document decoding and encoding, and the
//! full load/set cycle against files on disk.

pub mod common;

pub use common::*;
