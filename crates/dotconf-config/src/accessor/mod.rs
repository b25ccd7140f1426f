//! Dot-path resolution over a [`ConfigTree`].
//!
//! Lookups walk one segment at a time; every node before the last must be a
//! tree. Misses are `None`, never errors. Writes only replace or add a leaf
//! inside a parent that already exists, so a hand-written document never
//! grows new sections behind the author's back.

use dotconf_core::error::{ConfigError, ConfigResult};
use dotconf_core::types::{ConfigTree, ConfigValue, KeyPath};

/// Resolve `path`, returning the addressed value if every segment exists
pub fn get<'a>(tree: &'a ConfigTree, path: &KeyPath) -> Option<&'a ConfigValue> {
    let (parents, leaf) = path.split_leaf();
    resolve_parent(tree, parents)?.get(leaf)
}

/// Mutable variant of [`get`]
pub fn get_mut<'a>(tree: &'a mut ConfigTree, path: &KeyPath) -> Option<&'a mut ConfigValue> {
    let (parents, leaf) = path.split_leaf();
    resolve_parent_mut(tree, parents)?.get_mut(leaf)
}

/// True if the full path resolves. A null leaf still counts as present.
pub fn has(tree: &ConfigTree, path: &KeyPath) -> bool {
    get(tree, path).is_some()
}

/// Assign `value` at `path`, returning the value it replaced.
///
/// Fails with `KeyNotFound` if any parent segment is missing or is not a
/// tree; the tree is left untouched in that case.
pub fn set(tree: &mut ConfigTree, path: &KeyPath, value: ConfigValue) -> ConfigResult<Option<ConfigValue>> {
    let (parents, leaf) = path.split_leaf();
    let parent = resolve_parent_mut(tree, parents).ok_or_else(|| ConfigError::KeyNotFound {
        key: path.to_string(),
    })?;
    Ok(parent.insert(leaf, value))
}

/// [`get`] with an unparsed key; invalid keys resolve to nothing
pub fn get_key<'a>(tree: &'a ConfigTree, key: &str) -> Option<&'a ConfigValue> {
    KeyPath::parse(key).ok().and_then(|path| get(tree, &path))
}

/// [`has`] with an unparsed key; invalid keys are never present
pub fn has_key(tree: &ConfigTree, key: &str) -> bool {
    get_key(tree, key).is_some()
}

/// [`set`] with an unparsed key
pub fn set_key(tree: &mut ConfigTree, key: &str, value: ConfigValue) -> ConfigResult<Option<ConfigValue>> {
    let path = KeyPath::parse(key)?;
    set(tree, &path, value)
}

fn resolve_parent<'a>(tree: &'a ConfigTree, parents: &[String]) -> Option<&'a ConfigTree> {
    parents
        .iter()
        .try_fold(tree, |node, segment| node.get(segment)?.as_tree())
}

fn resolve_parent_mut<'a>(tree: &'a mut ConfigTree, parents: &[String]) -> Option<&'a mut ConfigTree> {
    let mut node = tree;
    for segment in parents {
        node = node.get_mut(segment)?.as_tree_mut()?;
    }
    Some(node)
}
