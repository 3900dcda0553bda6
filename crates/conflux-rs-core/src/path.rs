//! Helpers for addressing nested configuration values by path segments.
//!
//! Paths are sequences of segments; object members are addressed by key and
//! array elements by their decimal index.

use serde_json::{Map, Value};

/// Build an owned path from borrowed segments.
pub fn path_of(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| segment.to_string()).collect()
}

/// Join nested paths for messages, using `root` for the empty path.
pub fn join_path(path: &[String]) -> String {
    if path.is_empty() {
        "root".to_string()
    } else {
        path.join(".")
    }
}

/// Look up the value defined at `path`.
///
/// A JSON `null` counts as defined; only absent keys and out-of-range
/// indices yield `None`.
pub fn lookup<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    })
}

/// Whether `value` defines an entry at `path`.
pub fn is_defined(value: &Value, path: &[String]) -> bool {
    lookup(value, path).is_some()
}

/// Insert `leaf` at `path`, creating intermediate objects as needed.
///
/// Intermediate values that are not objects are replaced.
pub fn insert_at(root: &mut Value, path: &[String], leaf: Value) {
    let Some((last, parents)) = path.split_last() else {
        *root = leaf;
        return;
    };
    let mut current = root;
    for segment in parents {
        current = ensure_object(current)
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(current).insert(last.clone(), leaf);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was replaced with an object"),
    }
}
