//! Unit tests for CLI commands.

use super::*;
use camino::Utf8PathBuf;
use clap::Parser;
use dotconf_core::error::ConfigError;
use dotconf_core::types::ConfigValue;
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory for testing
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::try_from(dir.path().join(name)).expect("temp paths are UTF-8");
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Parse a full command line and run it the way `main` does
fn run(args: &[&str]) -> ConfigResult<CommandStatus> {
    let cli = Cli::try_parse_from(args).expect("valid command line");
    let mut ctx = CommandContext::new(&cli)?;
    dispatch_command(cli.command, &mut ctx)
}

#[test]
fn test_build_options_prefers_explicit_format() {
    let options = build_options(Utf8Path::new("app.json"), Some("yaml"), None).unwrap();
    assert_eq!(options.format(), FormatKind::Yaml);

    let options = build_options(Utf8Path::new("app.json"), Some("YML"), None).unwrap();
    assert_eq!(options.format(), FormatKind::Yaml);
}

#[test]
fn test_build_options_infers_from_extension() {
    let options = build_options(Utf8Path::new("conf/app.toml"), None, None).unwrap();
    assert_eq!(options.format(), FormatKind::Toml);

    let options = build_options(Utf8Path::new("settings"), None, None).unwrap();
    assert_eq!(options.format(), FormatKind::Json);
}

#[test]
fn test_build_options_rejects_unknown_format() {
    let err = build_options(Utf8Path::new("app.json"), Some("ini"), None).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { ref name } if name == "ini"));
}

#[test]
fn test_build_options_env_prefix() {
    let options = build_options(Utf8Path::new("app.json"), None, Some("APP")).unwrap();
    assert!(options.automatic_env_enabled());
    assert_eq!(options.env_prefix(), Some("APP"));

    let options = build_options(Utf8Path::new("app.json"), None, None).unwrap();
    assert!(!options.automatic_env_enabled());
}

#[test]
fn test_render_values() {
    assert_eq!(get::render(&ConfigValue::from("localhost")).unwrap(), "localhost");
    assert_eq!(get::render(&ConfigValue::Integer(8080)).unwrap(), "8080");
    assert_eq!(get::render(&ConfigValue::Null).unwrap(), "null");

    let tree: dotconf_core::types::ConfigTree = [("host", "db"), ("user", "admin")].into_iter().collect();
    assert_eq!(
        get::render(&tree.into()).unwrap(),
        "{\n  \"host\": \"db\",\n  \"user\": \"admin\"\n}"
    );
}

#[test]
fn test_parse_set_value() {
    assert_eq!(set::parse_value("42", false), ConfigValue::Integer(42));
    assert_eq!(set::parse_value("true", false), ConfigValue::Bool(true));
    assert_eq!(set::parse_value("null", false), ConfigValue::Null);
    assert_eq!(set::parse_value("\"quoted\"", false), ConfigValue::from("quoted"));
    assert_eq!(set::parse_value("localhost", false), ConfigValue::from("localhost"));
    assert_eq!(set::parse_value("42", true), ConfigValue::from("42"));
    assert!(set::parse_value("{\"a\": 1}", false).as_tree().is_some());
}

#[test]
fn test_describe_format() {
    assert_eq!(describe_format(FormatKind::Yaml), "YAML (.yaml, .yml)");
    assert_eq!(describe_format(FormatKind::Json), "JSON (.json)");
}

#[test]
fn test_get_and_has_status() {
    let temp_dir = create_temp_dir();
    let path = write_file(&temp_dir, "app.yaml", "db:\n  host: localhost\n");

    assert_eq!(run(&["dotconf", "-c", path.as_str(), "get", "db.host"]).unwrap(), CommandStatus::Success);
    assert_eq!(run(&["dotconf", "-c", path.as_str(), "get", "db.port"]).unwrap(), CommandStatus::Failure);
    assert_eq!(run(&["dotconf", "-c", path.as_str(), "has", "db"]).unwrap(), CommandStatus::Success);
    assert_eq!(run(&["dotconf", "-c", path.as_str(), "has", "cache"]).unwrap(), CommandStatus::Failure);
}

#[test]
fn test_set_writes_file() {
    let temp_dir = create_temp_dir();
    let path = write_file(&temp_dir, "app.toml", "[db]\nhost = \"localhost\"\n");

    let status = run(&["dotconf", "-c", path.as_str(), "set", "db.port", "5432"]).unwrap();
    assert_eq!(status, CommandStatus::Success);
    run(&["dotconf", "-c", path.as_str(), "set", "db.user", "42", "--string"]).unwrap();

    let config = Config::open(path.clone(), ConfigOptions::for_path(&path)).unwrap();
    assert_eq!(config.get("db.port"), Some(&ConfigValue::Integer(5432)));
    assert_eq!(config.get("db.user"), Some(&ConfigValue::from("42")));
    assert_eq!(config.get("db.host"), Some(&ConfigValue::from("localhost")));
}

#[test]
fn test_set_missing_parent_fails() {
    let temp_dir = create_temp_dir();
    let path = write_file(&temp_dir, "app.json", r#"{"db": {}}"#);

    let err = run(&["dotconf", "-c", path.as_str(), "set", "cache.ttl", "60"]).unwrap_err();
    assert!(matches!(err, ConfigError::KeyNotFound { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"db": {}}"#);
}

#[test]
fn test_raw_conversion() {
    let temp_dir = create_temp_dir();
    let path = write_file(&temp_dir, "app.json", r#"{"a": {"b": 1}}"#);

    assert_eq!(run(&["dotconf", "-c", path.as_str(), "raw"]).unwrap(), CommandStatus::Success);
    assert_eq!(
        run(&["dotconf", "-c", path.as_str(), "raw", "--output", "toml"]).unwrap(),
        CommandStatus::Success
    );

    let err = run(&["dotconf", "-c", path.as_str(), "raw", "--output", "xml"]).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("absent.json");
    let path = path.to_str().expect("temp paths are UTF-8");

    let err = run(&["dotconf", "-c", path, "get", "a"]).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));

    // format never reads the file
    assert_eq!(run(&["dotconf", "-c", path, "format"]).unwrap(), CommandStatus::Success);
}

#[test]
fn test_unknown_format_aborts() {
    let err = run(&["dotconf", "--format", "ini", "format"]).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_env_prefix_tolerates_missing_file() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("absent.json");
    let path = path.to_str().expect("temp paths are UTF-8");

    let status = run(&["dotconf", "-c", path, "--env-prefix", "DOTCONF_CLI_UNSET_PREFIX", "has", "a"]).unwrap();
    assert_eq!(status, CommandStatus::Failure);
}
