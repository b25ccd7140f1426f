//! Utility functions and helpers.
//!
//! Common functionality used across multiple dotconf crates.

pub mod fs;
pub mod path;

// Re-export commonly used utilities
pub use fs::write_atomic;
pub use path::get_extension;
