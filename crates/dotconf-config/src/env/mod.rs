//! Environment variable overlay applied to freshly decoded trees.
//!
//! A top-level string value that names a set environment variable is
//! replaced by that variable's value, so a document can say
//! `"password": "DB_PASSWORD"` and receive the secret at load time. Only the
//! first level is inspected; nested trees are left exactly as decoded.

use dotconf_core::types::{ConfigTree, ConfigValue};
use tracing::{debug, trace};

/// Resolves an environment variable name to its value
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Substitute top-level string values that name an environment variable
pub fn apply_env_overrides<F>(mut tree: ConfigTree, lookup: F) -> ConfigTree
where
    F: Fn(&str) -> Option<String>,
{
    let substituted = overlay_in_place(&mut tree, &lookup);
    if substituted > 0 {
        debug!(substituted, "applied environment overrides");
    }
    tree
}

/// Read a variable from the process environment.
///
/// Strings that cannot be variable names are never looked up, and values
/// that are not valid UTF-8 count as unset.
pub fn process_env(name: &str) -> Option<String> {
    if !is_valid_var_name(name) {
        return None;
    }
    std::env::var(name).ok()
}

/// The default lookup, boxed for storage in an adapter
pub fn process_env_lookup() -> EnvLookup {
    Box::new(process_env)
}

fn overlay_in_place<F>(tree: &mut ConfigTree, lookup: &F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let mut substituted = 0;

    for (key, value) in tree.iter_mut() {
        let ConfigValue::String(name) = &*value else {
            continue;
        };
        if let Some(resolved) = lookup(name) {
            trace!(key, var = %name, "substituting environment variable");
            *value = ConfigValue::String(resolved);
            substituted += 1;
        }
    }

    substituted
}

fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}
