//! TOML documents.
//!
//! Decoding goes through the `toml` crate; encoding builds a
//! `toml_edit` document so nested trees come out as `[section]` headers and
//! lists of trees as `[[section]]` arrays instead of one long inline table.

use dotconf_core::error::CodecError;
use dotconf_core::types::{ConfigTree, ConfigValue, FormatKind};
use toml_edit::{Array, ArrayOfTables, DocumentMut, InlineTable, Item, Table};

use crate::adapter::{Codec, FileAdapter};

/// TOML codec
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

/// Adapter for `.toml` files
pub type TomlAdapter = FileAdapter<TomlCodec>;

impl Codec for TomlCodec {
    const FORMAT: FormatKind = FormatKind::Toml;

    fn decode(content: &str) -> Result<ConfigTree, CodecError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| toml_error(content, &e))?;
        Ok(tree_from_table(table))
    }

    fn encode(tree: &ConfigTree) -> Result<String, CodecError> {
        let mut document = DocumentMut::new();
        fill_table(document.as_table_mut(), tree, "")?;
        Ok(document.to_string())
    }
}

fn from_toml_value(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Integer(i),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        // No datetime in the value model; keep the RFC 3339 text
        toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        toml::Value::Array(items) => ConfigValue::Sequence(items.into_iter().map(from_toml_value).collect()),
        toml::Value::Table(table) => ConfigValue::Tree(tree_from_table(table)),
    }
}

fn tree_from_table(table: toml::Table) -> ConfigTree {
    table
        .into_iter()
        .map(|(key, value)| (key, from_toml_value(value)))
        .collect()
}

fn toml_error(content: &str, e: &toml::de::Error) -> CodecError {
    let message = e.message().trim_end().replace('\n', "; ");
    match e.span() {
        Some(span) => {
            let before = &content[..span.start.min(content.len())];
            let line = before.matches('\n').count() + 1;
            let column = before
                .rsplit('\n')
                .next()
                .map_or(0, |tail| tail.chars().count())
                + 1;
            CodecError::at(message, line, column)
        },
        None => CodecError::new(message),
    }
}

// toml_edit renders a table's plain values before its sub-table headers, so a
// key that precedes a sibling table in the tree can move after it on disk.
fn fill_table(table: &mut Table, tree: &ConfigTree, prefix: &str) -> Result<(), CodecError> {
    for (key, value) in tree.iter() {
        let path = child_path(prefix, key);
        table.insert(key, to_item(value, &path)?);
    }

    // Parents that only hold sub-tables need no header of their own
    let only_tables = table
        .iter()
        .all(|(_, item)| matches!(item, Item::Table(_) | Item::ArrayOfTables(_)));
    if !prefix.is_empty() && !table.is_empty() && only_tables {
        table.set_implicit(true);
    }
    Ok(())
}

fn to_item(value: &ConfigValue, path: &str) -> Result<Item, CodecError> {
    match value {
        ConfigValue::Tree(tree) => {
            let mut table = Table::new();
            fill_table(&mut table, tree, path)?;
            Ok(Item::Table(table))
        },
        ConfigValue::Sequence(items) if is_table_array(items) => {
            let mut array = ArrayOfTables::new();
            for item in items {
                if let ConfigValue::Tree(tree) = item {
                    let mut table = Table::new();
                    fill_table(&mut table, tree, path)?;
                    array.push(table);
                }
            }
            Ok(Item::ArrayOfTables(array))
        },
        other => to_value(other, path).map(Item::Value),
    }
}

fn to_value(value: &ConfigValue, path: &str) -> Result<toml_edit::Value, CodecError> {
    let converted = match value {
        ConfigValue::Null => {
            return Err(CodecError::new(format!(
                "TOML cannot represent null (key '{}')",
                path
            )))
        },
        ConfigValue::Bool(b) => toml_edit::Value::from(*b),
        ConfigValue::Integer(i) => toml_edit::Value::from(*i),
        ConfigValue::Float(f) => toml_edit::Value::from(*f),
        ConfigValue::String(s) => toml_edit::Value::from(s.as_str()),
        ConfigValue::Sequence(items) => {
            let mut array = Array::new();
            for item in items {
                array.push(to_value(item, path)?);
            }
            toml_edit::Value::Array(array)
        },
        ConfigValue::Tree(tree) => {
            let mut inline = InlineTable::new();
            for (key, item) in tree.iter() {
                inline.insert(key, to_value(item, &child_path(path, key))?);
            }
            toml_edit::Value::InlineTable(inline)
        },
    };
    Ok(converted)
}

fn is_table_array(items: &[ConfigValue]) -> bool {
    !items.is_empty() && items.iter().all(|item| matches!(item, ConfigValue::Tree(_)))
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
