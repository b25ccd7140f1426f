//! Construction options for [`crate::Config`]

use camino::Utf8Path;
use dotconf_core::types::FormatKind;

/// Options applied when constructing a [`crate::Config`].
///
/// Every combinator consumes and returns the options, so an override can
/// never land on a temporary copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Document format of the config file
    format: FormatKind,
    /// Whether `Config::lookup` consults the environment first
    automatic_env: bool,
    /// Prefix for derived environment variable names
    env_prefix: Option<String>,
}

impl ConfigOptions {
    /// JSON, no automatic environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Options whose format matches the file extension, falling back to JSON
    pub fn for_path(path: impl AsRef<Utf8Path>) -> Self {
        let format = FormatKind::from_path(path.as_ref()).unwrap_or_default();
        Self::new().with_format(format)
    }

    pub fn with_format(mut self, format: FormatKind) -> Self {
        self.format = format;
        self
    }

    pub fn with_json(self) -> Self {
        self.with_format(FormatKind::Json)
    }

    pub fn with_yaml(self) -> Self {
        self.with_format(FormatKind::Yaml)
    }

    pub fn with_toml(self) -> Self {
        self.with_format(FormatKind::Toml)
    }

    /// Enable automatic environment lookups.
    ///
    /// With prefix `app`, key `database.host` maps to `APP_DATABASE_HOST`.
    /// An empty prefix derives names from the key alone.
    pub fn automatic_env(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('_');
        self.automatic_env = true;
        self.env_prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        self
    }

    pub fn format(&self) -> FormatKind {
        self.format
    }

    pub fn automatic_env_enabled(&self) -> bool {
        self.automatic_env
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }
}
