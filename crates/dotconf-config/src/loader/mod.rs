//! The `Config` facade: one adapter chosen by format, plus options.

use camino::{Utf8Path, Utf8PathBuf};
use dotconf_core::error::{ConfigError, ConfigResult};
use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind, KeyPath};
use tracing::debug;

use crate::adapter::FormatAdapter;
use crate::env;
use crate::json::JsonAdapter;
use crate::options::ConfigOptions;
use crate::toml::TomlAdapter;
use crate::yaml::YamlAdapter;

/// Build the adapter registered for `format`
pub fn adapter_for(format: FormatKind, path: impl Into<Utf8PathBuf>) -> Box<dyn FormatAdapter> {
    match format {
        FormatKind::Json => Box::new(JsonAdapter::new(path)),
        FormatKind::Yaml => Box::new(YamlAdapter::new(path)),
        FormatKind::Toml => Box::new(TomlAdapter::new(path)),
    }
}

/// A configuration file bound to the adapter for its format
#[derive(Debug)]
pub struct Config {
    adapter: Box<dyn FormatAdapter>,
    options: ConfigOptions,
}

impl Config {
    /// Create an unloaded config; the tree is empty until [`Config::load`]
    pub fn new(path: impl Into<Utf8PathBuf>, options: ConfigOptions) -> Self {
        let adapter = adapter_for(options.format(), path);
        Self { adapter, options }
    }

    /// Create and load in one step
    pub fn open(path: impl Into<Utf8PathBuf>, options: ConfigOptions) -> ConfigResult<Self> {
        let mut config = Self::new(path, options);
        config.load()?;
        Ok(config)
    }

    /// Wrap an existing adapter. The adapter's own format wins over `options`.
    pub fn from_adapter(adapter: Box<dyn FormatAdapter>, options: ConfigOptions) -> Self {
        let options = options.with_format(adapter.format());
        Self { adapter, options }
    }

    /// Read and decode the file, replacing the current tree.
    ///
    /// With automatic environment enabled a missing file is not an error.
    pub fn load(&mut self) -> ConfigResult<()> {
        match self.adapter.load() {
            Err(ConfigError::FileNotFound { path }) if self.options.automatic_env_enabled() => {
                debug!(%path, "config file not found, relying on environment");
                Ok(())
            },
            result => result,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.adapter.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.adapter.has(key)
    }

    /// Assign a value and write the whole tree back to the file
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) -> ConfigResult<()> {
        self.adapter.set(key, value.into())
    }

    pub fn raw(&self) -> &ConfigTree {
        self.adapter.raw()
    }

    pub fn format(&self) -> FormatKind {
        self.adapter.format()
    }

    pub fn path(&self) -> &Utf8Path {
        self.adapter.path()
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Environment variable name for `key` under automatic environment.
    ///
    /// `database.host` with prefix `app` becomes `APP_DATABASE_HOST`. `None`
    /// when automatic environment is off or the key is invalid.
    pub fn env_key(&self, key: &str) -> Option<String> {
        if !self.options.automatic_env_enabled() {
            return None;
        }
        let path = KeyPath::parse(key).ok()?;

        let mut parts = Vec::with_capacity(path.len() + 1);
        parts.extend(self.options.env_prefix());
        parts.extend(path.segments().iter().map(String::as_str));
        Some(parts.join("_").to_ascii_uppercase())
    }

    /// Like [`Config::get`], but an environment variable derived by
    /// [`Config::env_key`] takes precedence over the file
    pub fn lookup(&self, key: &str) -> Option<ConfigValue> {
        if let Some(value) = self.env_key(key).and_then(|name| env::process_env(&name)) {
            return Some(ConfigValue::String(value));
        }
        self.get(key).cloned()
    }
}
