//! Core data types for dotconf.
//!
//! This module provides the fundamental types shared by every adapter:
//! - The generic value tree documents decode into
//! - Dot-separated key paths
//! - The closed set of document formats

pub mod format;
pub mod path;
pub mod value;

// Re-export all public types
pub use format::FormatKind;
pub use path::KeyPath;
pub use value::{ConfigTree, ConfigValue};
