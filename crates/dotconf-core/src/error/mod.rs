//! Error types and result aliases for dotconf operations.
//!
//! Provides a single error type covering every failure a configuration
//! adapter can surface, with actionable messages and suggestions.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::types::FormatKind;

/// Position inside a document reported by a codec (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failure reported by a format codec while decoding or encoding a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    pub message: String,
    pub location: Option<Location>,
}

impl CodecError {
    /// Create a codec error without a location
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Create a codec error pointing at a line and column
    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            location: Some(Location { line, column }),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} at {}", self.message, location),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CodecError {}

/// Unified error type for all dotconf operations
#[derive(Error, Debug)]
pub enum ConfigError {
    // Load errors
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: Utf8PathBuf },

    #[error("Failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path} as {format}: {source}")]
    Decode {
        path: Utf8PathBuf,
        format: FormatKind,
        #[source]
        source: CodecError,
    },

    // Key errors
    #[error("Invalid key '{key}': keys are non-empty, dot-separated segments")]
    InvalidKey { key: String },

    #[error("Unable to find key '{key}' in config tree")]
    KeyNotFound { key: String },

    // Persistence errors
    #[error("Failed to encode config tree as {format}: {source}")]
    Encode {
        format: FormatKind,
        #[source]
        source: CodecError,
    },

    #[error("Failed to write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Construction errors
    #[error("Unsupported configuration format: {name}")]
    UnsupportedFormat { name: String },
}

/// Result type alias for dotconf operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Map a read failure, distinguishing a missing file from other IO errors
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Check if retrying the same call could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConfigError::Read { .. } | ConfigError::Write { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConfigError::FileNotFound { .. } => {
                Some("Check the file path, or enable automatic environment to run without a file")
            },
            ConfigError::Decode { .. } => {
                Some("Fix the syntax at the reported location, or select the matching format")
            },
            ConfigError::InvalidKey { .. } => Some("Use keys like 'database.pool.size' with no empty segments"),
            ConfigError::KeyNotFound { .. } => {
                Some("Only existing sections can be written; add the parent section to the file first")
            },
            ConfigError::Encode { .. } | ConfigError::Write { .. } => {
                Some("The in-memory tree no longer matches the file; reload before retrying")
            },
            ConfigError::UnsupportedFormat { .. } => Some("Supported formats are json, yaml and toml"),
            ConfigError::Read { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_maps_not_found() {
        let err = ConfigError::io("missing.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ConfigError::FileNotFound { ref path } if path == "missing.json"));
        assert!(!err.is_recoverable());

        let err = ConfigError::io("locked.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_codec_error_display() {
        assert_eq!(CodecError::new("bad input").to_string(), "bad input");
        assert_eq!(
            CodecError::at("expected value", 3, 7).to_string(),
            "expected value at line 3, column 7"
        );
    }

    #[test]
    fn test_decode_error_message() {
        let err = ConfigError::Decode {
            path: "app.toml".into(),
            format: FormatKind::Toml,
            source: CodecError::at("invalid table header", 2, 1),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode app.toml as TOML: invalid table header at line 2, column 1"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_suggestions_do_not_name_cli_flags() {
        let errors = [
            ConfigError::FileNotFound { path: "app.json".into() },
            ConfigError::Decode {
                path: "app.json".into(),
                format: FormatKind::Json,
                source: CodecError::new("expected value"),
            },
        ];
        for err in errors {
            let suggestion = err.suggestion().unwrap();
            assert!(!suggestion.contains("--"), "{}", suggestion);
        }
    }
}
