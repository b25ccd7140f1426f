//! Format adapters: a file path plus the tree decoded from it.
//!
//! All path logic lives in [`crate::accessor`] and all environment handling
//! in [`crate::env`]; a format only contributes a [`Codec`]. The concrete
//! adapters are aliases of [`FileAdapter`] over each codec.

use std::fmt;
use std::fs;
use std::marker::PhantomData;

use camino::{Utf8Path, Utf8PathBuf};
use dotconf_core::error::{CodecError, ConfigError, ConfigResult};
use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind, KeyPath};
use dotconf_core::utils::write_atomic;
use tracing::debug;

use crate::accessor;
use crate::env::{self, EnvLookup};
use crate::json::JsonCodec;
use crate::toml::TomlCodec;
use crate::yaml::YamlCodec;

/// Decoding and encoding for one document format
pub trait Codec {
    const FORMAT: FormatKind;

    /// Decode a whole document; the root must be a mapping
    fn decode(content: &str) -> Result<ConfigTree, CodecError>;

    /// Encode a whole tree as a document
    fn encode(tree: &ConfigTree) -> Result<String, CodecError>;
}

/// Capability set shared by every format adapter
pub trait FormatAdapter: fmt::Debug + Send {
    /// The adapter's format; never changes
    fn format(&self) -> FormatKind;

    /// The backing file
    fn path(&self) -> &Utf8Path;

    /// Read, decode and overlay the file, replacing the stored tree.
    ///
    /// On error the previously stored tree is kept.
    fn load(&mut self) -> ConfigResult<()>;

    /// Value at a dotted key, or `None` if any segment is missing
    fn get(&self, key: &str) -> Option<&ConfigValue>;

    /// Assign a value under an existing parent and write the file back.
    ///
    /// If encoding or writing fails the in-memory tree already holds the new
    /// value; reload to get back in sync with the file.
    fn set(&mut self, key: &str, value: ConfigValue) -> ConfigResult<()>;

    /// True if the dotted key resolves
    fn has(&self, key: &str) -> bool;

    /// The stored tree
    fn raw(&self) -> &ConfigTree;
}

/// Adapter over a file in the format of `C`
pub struct FileAdapter<C> {
    path: Utf8PathBuf,
    tree: ConfigTree,
    env: EnvLookup,
    codec: PhantomData<fn() -> C>,
}

impl<C: Codec> FileAdapter<C> {
    /// Create an adapter with an empty tree; nothing is read until `load`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            tree: ConfigTree::new(),
            env: env::process_env_lookup(),
            codec: PhantomData,
        }
    }

    /// Replace the environment consulted by the overlay during `load`
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    fn persist(&self) -> ConfigResult<()> {
        let encoded = C::encode(&self.tree).map_err(|source| ConfigError::Encode {
            format: C::FORMAT,
            source,
        })?;

        write_atomic(&self.path, encoded.as_bytes()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path, bytes = encoded.len(), "wrote configuration");
        Ok(())
    }
}

impl<C: Codec> FormatAdapter for FileAdapter<C> {
    fn format(&self) -> FormatKind {
        C::FORMAT
    }

    fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&mut self) -> ConfigResult<()> {
        let bytes = fs::read(&self.path).map_err(|e| ConfigError::io(self.path.clone(), e))?;

        let decode_error = |source: CodecError| ConfigError::Decode {
            path: self.path.clone(),
            format: C::FORMAT,
            source,
        };
        let content = String::from_utf8(bytes)
            .map_err(|e| decode_error(CodecError::new(format!("file is not valid UTF-8: {}", e))))?;
        let decoded = C::decode(&content).map_err(decode_error)?;

        let tree = env::apply_env_overrides(decoded, |name: &str| (self.env)(name));
        debug!(path = %self.path, format = %C::FORMAT, keys = tree.len(), "loaded configuration");

        self.tree = tree;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&ConfigValue> {
        accessor::get_key(&self.tree, key)
    }

    fn set(&mut self, key: &str, value: ConfigValue) -> ConfigResult<()> {
        let path = KeyPath::parse(key)?;
        accessor::set(&mut self.tree, &path, value)?;
        debug!(key, "updated configuration value");
        self.persist()
    }

    fn has(&self, key: &str) -> bool {
        accessor::has_key(&self.tree, key)
    }

    fn raw(&self) -> &ConfigTree {
        &self.tree
    }
}

impl<C: Codec> fmt::Debug for FileAdapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAdapter")
            .field("format", &C::FORMAT)
            .field("path", &self.path)
            .field("keys", &self.tree.len())
            .finish_non_exhaustive()
    }
}

/// Decode a document held in memory
pub fn decode_tree(format: FormatKind, content: &str) -> Result<ConfigTree, CodecError> {
    match format {
        FormatKind::Json => JsonCodec::decode(content),
        FormatKind::Yaml => YamlCodec::decode(content),
        FormatKind::Toml => TomlCodec::decode(content),
    }
}

/// Encode a tree in the given format without touching the file system
pub fn encode_tree(format: FormatKind, tree: &ConfigTree) -> ConfigResult<String> {
    let encoded = match format {
        FormatKind::Json => JsonCodec::encode(tree),
        FormatKind::Yaml => YamlCodec::encode(tree),
        FormatKind::Toml => TomlCodec::encode(tree),
    };
    encoded.map_err(|source| ConfigError::Encode { format, source })
}

/// Build a codec error, moving a trailing " at line L column C" that the
/// codec already rendered into the structured location
pub(crate) fn codec_error_at(message: String, line: usize, column: usize) -> CodecError {
    let suffix = format!(" at line {} column {}", line, column);
    match message.strip_suffix(&suffix) {
        Some(stripped) => CodecError::at(stripped, line, column),
        None if message.contains(" at line ") => CodecError::new(message),
        None => CodecError::at(message, line, column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonAdapter;
    use crate::toml::TomlAdapter;
    use crate::yaml::YamlAdapter;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_new_adapter_is_empty() {
        let adapter = JsonAdapter::new("config.json");
        assert!(adapter.raw().is_empty());
        assert_eq!(adapter.format(), FormatKind::Json);
        assert_eq!(adapter.path(), "config.json");
        assert!(!adapter.has("anything"));
    }

    #[test]
    fn test_load_applies_overlay() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "app.json",
            r#"{"password": "DB_PASSWORD", "db": {"host": "localhost", "port": "DB_PORT"}}"#,
        );

        let mut adapter = JsonAdapter::new(path)
            .with_env_lookup(env_of(&[("DB_PASSWORD", "secret123"), ("DB_PORT", "5432")]));
        adapter.load().unwrap();

        assert_eq!(adapter.get("password"), Some(&ConfigValue::from("secret123")));
        assert_eq!(adapter.get("db.host"), Some(&ConfigValue::from("localhost")));
        // Nested values are never substituted
        assert_eq!(adapter.get("db.port"), Some(&ConfigValue::from("DB_PORT")));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("missing.yaml")).unwrap();

        let mut adapter = YamlAdapter::new(path.clone());
        let err = adapter.load().unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound { path: ref p } if *p == path));
        assert!(adapter.raw().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_tree() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "app.toml", "[server]\nport = 8080\n");

        let mut adapter = TomlAdapter::new(path.clone());
        adapter.load().unwrap();
        let before = adapter.raw().clone();

        fs::write(&path, "[server\nport = ").unwrap();
        let err = adapter.load().unwrap_err();
        assert!(matches!(err, ConfigError::Decode { format: FormatKind::Toml, .. }));
        assert_eq!(adapter.raw(), &before);

        fs::remove_file(&path).unwrap();
        assert!(matches!(adapter.load(), Err(ConfigError::FileNotFound { .. })));
        assert_eq!(adapter.raw(), &before);
    }

    #[test]
    fn test_load_replaces_instead_of_merging() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "app.json", r#"{"a": 1, "b": 2}"#);

        let mut adapter = JsonAdapter::new(path.clone());
        adapter.load().unwrap();
        assert!(adapter.has("b"));

        fs::write(&path, r#"{"a": 10}"#).unwrap();
        adapter.load().unwrap();
        assert_eq!(adapter.get("a"), Some(&ConfigValue::Integer(10)));
        assert!(!adapter.has("b"));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("app.json")).unwrap();
        fs::write(&path, [0x7bu8, 0xff, 0x7d]).unwrap();

        let err = JsonAdapter::new(path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
    }

    #[test]
    fn test_set_persists_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "app.yaml", "server:\n  host: localhost\n  port: 8080\n");

        let mut adapter = YamlAdapter::new(path.clone());
        adapter.load().unwrap();
        adapter.set("server.port", 9090.into()).unwrap();
        assert_eq!(adapter.get("server.port"), Some(&ConfigValue::Integer(9090)));

        let mut reloaded = YamlAdapter::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get("server.port"), Some(&ConfigValue::Integer(9090)));
        assert_eq!(reloaded.get("server.host"), Some(&ConfigValue::from("localhost")));
    }

    #[cfg(unix)]
    #[test]
    fn test_set_through_symlink_updates_target() {
        let temp_dir = TempDir::new().unwrap();
        let real = write_file(&temp_dir, "real.json", r#"{"a": 1}"#);
        let link = real.with_file_name("app.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut adapter = JsonAdapter::new(link.clone());
        adapter.load().unwrap();
        adapter.set("a", 2.into()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let mut reloaded = JsonAdapter::new(real);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get("a"), Some(&ConfigValue::Integer(2)));
    }

    #[test]
    fn test_set_missing_parent_does_not_touch_file() {
        let temp_dir = TempDir::new().unwrap();
        let original = "{\"server\": {\"port\": 8080}}";
        let path = write_file(&temp_dir, "app.json", original);

        let mut adapter = JsonAdapter::new(path.clone());
        adapter.load().unwrap();
        let before = adapter.raw().clone();

        let err = adapter.set("cache.size", 10.into()).unwrap_err();
        assert!(matches!(err, ConfigError::KeyNotFound { ref key } if key == "cache.size"));
        assert!(matches!(adapter.set("server..port", 1.into()), Err(ConfigError::InvalidKey { .. })));

        assert_eq!(adapter.raw(), &before);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_set_encode_failure_keeps_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let original = "[server]\nport = 8080\n";
        let path = write_file(&temp_dir, "app.toml", original);

        let mut adapter = TomlAdapter::new(path.clone());
        adapter.load().unwrap();

        let err = adapter.set("server.port", ConfigValue::Null).unwrap_err();
        assert!(matches!(err, ConfigError::Encode { format: FormatKind::Toml, .. }));
        // Memory diverged from disk until the next load
        assert_eq!(adapter.get("server.port"), Some(&ConfigValue::Null));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);

        adapter.load().unwrap();
        assert_eq!(adapter.get("server.port"), Some(&ConfigValue::Integer(8080)));
    }

    #[test]
    fn test_set_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("gone").join("app.json")).unwrap();

        // Never loaded, so the root is an empty tree and single segments resolve
        let mut adapter = JsonAdapter::new(path);
        let err = adapter.set("name", "x".into()).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_codec_helpers() {
        let tree = decode_tree(FormatKind::Yaml, "a:\n  b: 1\n").unwrap();
        let json = encode_tree(FormatKind::Json, &tree).unwrap();
        assert_eq!(decode_tree(FormatKind::Json, &json).unwrap(), tree);

        let mut with_null = tree.clone();
        with_null.insert("c", ConfigValue::Null);
        assert!(matches!(
            encode_tree(FormatKind::Toml, &with_null),
            Err(ConfigError::Encode { format: FormatKind::Toml, .. })
        ));
    }

    #[test]
    fn test_codec_error_at() {
        let err = codec_error_at("EOF while parsing at line 2 column 5".to_string(), 2, 5);
        assert_eq!(err.message, "EOF while parsing");
        assert_eq!(err.to_string(), "EOF while parsing at line 2, column 5");

        let err = codec_error_at("bad key".to_string(), 1, 1);
        assert_eq!(err, CodecError::at("bad key", 1, 1));

        let err = codec_error_at("x at line 1 column 2, while parsing at line 1 column 1".to_string(), 9, 9);
        assert!(err.location.is_none());
    }
}
