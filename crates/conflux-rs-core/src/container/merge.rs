//! JSON merge helpers for layered configuration.

use serde_json::Value;

/// Layer `overlay` over `base`; this is the precedence rule every merged
/// container applies to its children in registration order.
///
/// Objects merge key by key. Arrays, scalars, and `null` replace the base
/// value wholesale.
pub fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                // A fresh slot starts as null, which any overlay replaces.
                merge_values(base_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, replacement) => *slot = replacement.clone(),
    }
}
