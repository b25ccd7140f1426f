//! YAML documents via `serde_yaml`.

use dotconf_core::error::CodecError;
use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind};
use serde_yaml::{Mapping, Value};

use crate::adapter::{codec_error_at, Codec, FileAdapter};

/// YAML codec
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

/// Adapter for `.yaml` / `.yml` files
pub type YamlAdapter = FileAdapter<YamlCodec>;

impl Codec for YamlCodec {
    const FORMAT: FormatKind = FormatKind::Yaml;

    fn decode(content: &str) -> Result<ConfigTree, CodecError> {
        let value: Value = serde_yaml::from_str(content).map_err(yaml_error)?;

        match value {
            Value::Mapping(mapping) => tree_from_mapping(mapping),
            // An empty (or comment-only) document
            Value::Null => Ok(ConfigTree::new()),
            other => Err(CodecError::new(format!(
                "document root must be a mapping, found {}",
                yaml_type(&other)
            ))),
        }
    }

    fn encode(tree: &ConfigTree) -> Result<String, CodecError> {
        serde_yaml::to_string(tree).map_err(|e| CodecError::new(format!("YAML serialization error: {}", e)))
    }
}

fn from_yaml_value(value: Value) -> Result<ConfigValue, CodecError> {
    let converted = match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                ConfigValue::Float(f)
            } else {
                ConfigValue::String(n.to_string())
            }
        },
        Value::String(s) => ConfigValue::String(s),
        Value::Sequence(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(from_yaml_value)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => ConfigValue::Tree(tree_from_mapping(mapping)?),
        // Custom tags carry no meaning for configuration lookups
        Value::Tagged(tagged) => from_yaml_value(tagged.value)?,
    };
    Ok(converted)
}

fn tree_from_mapping(mapping: Mapping) -> Result<ConfigTree, CodecError> {
    let mut tree = ConfigTree::new();
    for (key, value) in mapping {
        tree.insert(yaml_key(key)?, from_yaml_value(value)?);
    }
    Ok(tree)
}

/// Scalar keys become strings so `ports: {80: http}` is reachable as `ports.80`
fn yaml_key(key: Value) -> Result<String, CodecError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(CodecError::new(format!(
            "unsupported mapping key: {}",
            yaml_type(&other)
        ))),
    }
}

fn yaml_error(e: serde_yaml::Error) -> CodecError {
    match e.location() {
        Some(location) => codec_error_at(e.to_string(), location.line(), location.column()),
        None => CodecError::new(e.to_string()),
    }
}

fn yaml_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
