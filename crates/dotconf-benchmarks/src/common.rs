//! Common utilities for benchmarks

use criterion::Criterion;
use dotconf_core::types::{ConfigTree, ConfigValue};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// A tree `width` keys wide at every level, nested `depth` levels deep.
///
/// Leaves alternate between the value kinds every format can hold.
pub fn create_tree(width: usize, depth: usize) -> ConfigTree {
    (0..width)
        .map(|i| {
            let value = if depth > 1 {
                ConfigValue::Tree(create_tree(width, depth - 1))
            } else {
                leaf(i)
            };
            (format!("key{}", i), value)
        })
        .collect()
}

/// Dotted key reaching the deepest level of a [`create_tree`] tree
pub fn deep_key(depth: usize) -> String {
    vec!["key0"; depth].join(".")
}

fn leaf(i: usize) -> ConfigValue {
    match i % 4 {
        0 => ConfigValue::Integer(i as i64),
        1 => ConfigValue::String(format!("value-{}", i)),
        2 => ConfigValue::Bool(i % 8 == 2),
        _ => ConfigValue::Sequence(vec![ConfigValue::Float(i as f64 / 2.0), ConfigValue::from("item")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotconf_config::accessor::get_key;

    #[test]
    fn test_create_tree_shape() {
        let tree = create_tree(3, 4);
        assert_eq!(tree.len(), 3);
        assert_eq!(get_key(&tree, &deep_key(4)), Some(&ConfigValue::Integer(0)));
        assert!(get_key(&tree, &deep_key(5)).is_none());
    }
}
