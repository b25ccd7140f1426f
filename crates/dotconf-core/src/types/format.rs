//! Supported document formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::utils::get_extension;

/// Document format a configuration file is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    #[default]
    Json,
    Yaml,
    Toml,
}

struct FormatInfo {
    kind: FormatKind,
    name: &'static str,
    extensions: &'static [&'static str],
}

const FORMATS: [FormatInfo; 3] = [
    FormatInfo {
        kind: FormatKind::Json,
        name: "JSON",
        extensions: &[".json"],
    },
    FormatInfo {
        kind: FormatKind::Yaml,
        name: "YAML",
        extensions: &[".yaml", ".yml"],
    },
    FormatInfo {
        kind: FormatKind::Toml,
        name: "TOML",
        extensions: &[".toml"],
    },
];

impl FormatKind {
    /// Every supported format
    pub const ALL: [FormatKind; 3] = [FormatKind::Json, FormatKind::Yaml, FormatKind::Toml];

    fn info(self) -> &'static FormatInfo {
        match self {
            FormatKind::Json => &FORMATS[0],
            FormatKind::Yaml => &FORMATS[1],
            FormatKind::Toml => &FORMATS[2],
        }
    }

    /// Display name (`JSON`, `YAML`, `TOML`)
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// File extensions including the leading dot
    pub fn extensions(self) -> &'static [&'static str] {
        self.info().extensions
    }

    /// Look up a format by file extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        FORMATS
            .iter()
            .find(|info| info.extensions.iter().any(|e| e[1..] == ext))
            .map(|info| info.kind)
    }

    /// Infer the format from a file name
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        get_extension(path)
            .and_then(|ext| Self::from_extension(&ext))
            .ok_or_else(|| ConfigError::UnsupportedFormat {
                name: path.display().to_string(),
            })
    }
}

impl FromStr for FormatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        FORMATS
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(&lower))
            .map(|info| info.kind)
            .or_else(|| Self::from_extension(&lower))
            .ok_or_else(|| ConfigError::UnsupportedFormat { name: s.to_string() })
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
