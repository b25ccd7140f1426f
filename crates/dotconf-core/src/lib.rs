//! # dotconf-core
//!
//! Core types and utilities shared across all dotconf crates.
//!
//! This crate provides:
//! - `ConfigValue` / `ConfigTree`, the format-independent document model
//! - `KeyPath` for dot-separated keys such as `database.pool.size`
//! - `FormatKind`, the closed set of supported document formats
//! - `ConfigError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ConfigValue, KeyPath, FormatKind)
//! - `error`: Error types and result aliases
//! - `utils`: Path and file system helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{CodecError, ConfigError, ConfigResult, Location};
pub use types::{ConfigTree, ConfigValue, FormatKind, KeyPath};
