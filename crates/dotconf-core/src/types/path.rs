//! Dot-separated key paths.

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// Key path separator
pub const SEPARATOR: char = '.';

/// A parsed key such as `database.pool.size`.
///
/// Always holds at least one segment and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split a dotted key into segments
    pub fn parse(key: &str) -> ConfigResult<Self> {
        let segments: Vec<String> = key.split(SEPARATOR).map(str::to_string).collect();

        if segments.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidKey { key: key.to_string() });
        }

        Ok(Self { segments })
    }

    /// Build a path from already separated segments
    pub fn from_segments<I, S>(segments: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() || segments.iter().any(|s| s.is_empty() || s.contains(SEPARATOR)) {
            return Err(ConfigError::InvalidKey {
                key: segments.join("."),
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parent segments and the final segment
    pub fn split_leaf(&self) -> (&[String], &str) {
        // Non-empty by construction
        let (leaf, parents) = self
            .segments
            .split_last()
            .map(|(leaf, parents)| (leaf.as_str(), parents))
            .unwrap_or(("", &[][..]));
        (parents, leaf)
    }

    /// The final segment
    pub fn leaf(&self) -> &str {
        self.split_leaf().1
    }
}

impl FromStr for KeyPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
