//! Configuration trees for dotconf
//!
//! This crate loads JSON, YAML and TOML documents into a format-independent
//! [`ConfigTree`], resolves dot-separated keys against it, substitutes
//! top-level environment variable references, and writes changes back to
//! the original file.
//!
//! ```no_run
//! use dotconf_config::{Config, ConfigOptions};
//!
//! let mut config = Config::open("app.yaml", ConfigOptions::for_path("app.yaml"))?;
//! let host = config.get("database.host");
//! config.set("database.port", 5432)?;
//! # Ok::<(), dotconf_config::ConfigError>(())
//! ```

pub mod accessor;
pub mod adapter;
pub mod env;
pub mod json;
pub mod loader;
pub mod options;
pub mod toml;
pub mod yaml;

// Re-export main types
pub use adapter::{decode_tree, encode_tree, Codec, FileAdapter, FormatAdapter};
pub use json::{JsonAdapter, JsonCodec};
pub use loader::{adapter_for, Config};
pub use options::ConfigOptions;
pub use self::toml::{TomlAdapter, TomlCodec};
pub use yaml::{YamlAdapter, YamlCodec};

pub use dotconf_core::error::{CodecError, ConfigError, ConfigResult};
pub use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind, KeyPath};
