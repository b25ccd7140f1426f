//! JSON documents via `serde_json`.

use dotconf_core::error::CodecError;
use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind};
use serde_json::{Map, Value};

use crate::adapter::{codec_error_at, Codec, FileAdapter};

/// JSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

/// Adapter for `.json` files
pub type JsonAdapter = FileAdapter<JsonCodec>;

impl Codec for JsonCodec {
    const FORMAT: FormatKind = FormatKind::Json;

    fn decode(content: &str) -> Result<ConfigTree, CodecError> {
        let value: Value = serde_json::from_str(content).map_err(json_error)?;

        match value {
            Value::Object(map) => Ok(tree_from_map(map)),
            other => Err(CodecError::new(format!(
                "document root must be an object, found {}",
                json_type(&other)
            ))),
        }
    }

    fn encode(tree: &ConfigTree) -> Result<String, CodecError> {
        for (key, value) in tree.iter() {
            check_finite(key, value)?;
        }

        let mut output = serde_json::to_string_pretty(tree)
            .map_err(|e| CodecError::new(format!("JSON serialization error: {}", e)))?;
        output.push('\n');
        Ok(output)
    }
}

/// Parse a JSON literal (`42`, `true`, `"text"`, `{"a": 1}`) into a value
pub fn parse_value(raw: &str) -> Result<ConfigValue, CodecError> {
    serde_json::from_str::<Value>(raw)
        .map(from_json_value)
        .map_err(json_error)
}

/// Convert a decoded `serde_json` value
pub fn from_json_value(value: Value) -> ConfigValue {
    match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => n
                .as_f64()
                .map(ConfigValue::Float)
                .unwrap_or_else(|| ConfigValue::String(n.to_string())),
        },
        Value::String(s) => ConfigValue::String(s),
        Value::Array(items) => ConfigValue::Sequence(items.into_iter().map(from_json_value).collect()),
        Value::Object(map) => ConfigValue::Tree(tree_from_map(map)),
    }
}

fn tree_from_map(map: Map<String, Value>) -> ConfigTree {
    map.into_iter()
        .map(|(key, value)| (key, from_json_value(value)))
        .collect()
}

fn json_error(e: serde_json::Error) -> CodecError {
    if e.line() == 0 {
        CodecError::new(e.to_string())
    } else {
        codec_error_at(e.to_string(), e.line(), e.column())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// serde_json would quietly write NaN and infinities as null
fn check_finite(key: &str, value: &ConfigValue) -> Result<(), CodecError> {
    match value {
        ConfigValue::Float(f) if !f.is_finite() => Err(CodecError::new(format!(
            "JSON cannot represent {} (key '{}')",
            f, key
        ))),
        ConfigValue::Sequence(items) => items.iter().try_for_each(|item| check_finite(key, item)),
        ConfigValue::Tree(tree) => tree
            .iter()
            .try_for_each(|(child, item)| check_finite(&format!("{}.{}", key, child), item)),
        _ => Ok(()),
    }
}
