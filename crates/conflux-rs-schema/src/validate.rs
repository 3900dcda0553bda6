//! Validation and casting of merged values against a [`Schema`].

use crate::schema::{Schema, SchemaKind};
use conflux_rs_core::ValidationError;
use serde_json::{Map, Number, Value};

/// Validate `value` against `schema`, returning the cast value.
///
/// An object schema rejects a non-object root without naming a path.
pub fn validate(schema: &Schema, value: Value) -> Result<Value, ValidationError> {
    if matches!(schema.kind(), SchemaKind::Object { .. }) && !value.is_object() {
        return Err(ValidationError::generic("expected object at root"));
    }
    let mut path = Vec::new();
    let validated = validate_node(schema, Some(value), &mut path)?;
    Ok(validated.unwrap_or_else(|| Value::Object(Map::new())))
}

/// Validate a possibly absent value; `null` counts as absent.
fn validate_node(
    schema: &Schema,
    value: Option<Value>,
    path: &mut Vec<String>,
) -> Result<Option<Value>, ValidationError> {
    match value.filter(|value| !value.is_null()) {
        Some(value) => validate_value(schema, value, path).map(Some),
        None => fill_absent(schema, path),
    }
}

/// Default, nested defaults, or a missing-value failure.
fn fill_absent(schema: &Schema, path: &mut Vec<String>) -> Result<Option<Value>, ValidationError> {
    if let Some(default) = schema.default_value() {
        return validate_value(schema, default.clone(), path).map(Some);
    }
    if schema.is_required() {
        return Err(ValidationError::undefined(
            "missing required field",
            path.clone(),
        ));
    }
    if matches!(schema.kind(), SchemaKind::Object { .. }) {
        let filled = validate_value(schema, Value::Object(Map::new()), path)?;
        let is_empty = filled.as_object().is_some_and(Map::is_empty);
        return Ok((!is_empty).then_some(filled));
    }
    Ok(None)
}

fn validate_value(
    schema: &Schema,
    value: Value,
    path: &mut Vec<String>,
) -> Result<Value, ValidationError> {
    match schema.kind() {
        SchemaKind::Any => Ok(value),
        SchemaKind::String => expect_string(value, path),
        SchemaKind::Integer { min, max } => {
            let value = cast_integer(value, path)?;
            ensure_range(value, *min, *max, path)
        }
        SchemaKind::Number { min, max } => {
            let value = cast_number(value, path)?;
            ensure_range(value, *min, *max, path)
        }
        SchemaKind::Boolean => cast_boolean(value, path),
        SchemaKind::Array(item) => {
            let items = cast_array(value, path)?;
            let mut out = Vec::with_capacity(items.len());
            for (idx, entry) in items.into_iter().enumerate() {
                path.push(idx.to_string());
                let validated = validate_value(item, entry, path);
                path.pop();
                out.push(validated?);
            }
            Ok(Value::Array(out))
        }
        SchemaKind::Object {
            fields,
            allow_unknown,
        } => {
            let mut map = expect_object(value, path)?;
            if !allow_unknown {
                ensure_allowed_keys(&map, fields, path)?;
            }
            for (name, child) in fields {
                path.push(name.clone());
                let validated = validate_node(child, map.remove(name), path);
                path.pop();
                if let Some(value) = validated? {
                    map.insert(name.clone(), value);
                }
            }
            Ok(Value::Object(map))
        }
    }
}

/// Expect a JSON object or return a typed error.
fn expect_object(value: Value, path: &[String]) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: Value, path: &[String]) -> Result<Value, ValidationError> {
    if value.is_string() {
        Ok(value)
    } else {
        Err(invalid_field(path, "expected string"))
    }
}

/// Accept integers and integer strings.
fn cast_integer(value: Value, path: &[String]) -> Result<Value, ValidationError> {
    match &value {
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(value),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid_field(path, "expected integer")),
        _ => Err(invalid_field(path, "expected integer")),
    }
}

/// Accept numbers and numeric strings; integer strings stay integers.
fn cast_number(value: Value, path: &[String]) -> Result<Value, ValidationError> {
    match &value {
        Value::Number(_) => Ok(value),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(integer) = text.parse::<i64>() {
                return Ok(Value::from(integer));
            }
            text.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid_field(path, "expected number"))
        }
        _ => Err(invalid_field(path, "expected number")),
    }
}

/// Accept booleans and the usual textual spellings.
fn cast_boolean(value: Value, path: &[String]) -> Result<Value, ValidationError> {
    match &value {
        Value::Bool(_) => Ok(value),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(invalid_field(path, "expected bool")),
        },
        _ => Err(invalid_field(path, "expected bool")),
    }
}

/// Accept arrays and JSON-encoded array strings.
fn cast_array(value: Value, path: &[String]) -> Result<Vec<Value>, ValidationError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => Ok(items),
            _ => Err(invalid_field(path, "expected array")),
        },
        _ => Err(invalid_field(path, "expected array")),
    }
}

fn ensure_range(
    value: Value,
    min: Option<f64>,
    max: Option<f64>,
    path: &[String],
) -> Result<Value, ValidationError> {
    let Some(number) = value.as_f64() else {
        return Ok(value);
    };
    if let Some(min) = min.filter(|min| number < *min) {
        return Err(invalid_field(path, &format!("must be at least {min}")));
    }
    if let Some(max) = max.filter(|max| number > *max) {
        return Err(invalid_field(path, &format!("must be at most {max}")));
    }
    Ok(value)
}

/// Ensure an object contains only declared keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    fields: &[(String, Schema)],
    path: &[String],
) -> Result<(), ValidationError> {
    for key in map.keys() {
        if !fields.iter().any(|(name, _)| name == key) {
            let mut key_path = path.to_vec();
            key_path.push(key.clone());
            return Err(invalid_field(&key_path, "unknown key"));
        }
    }
    Ok(())
}

fn invalid_field(path: &[String], message: &str) -> ValidationError {
    if path.is_empty() {
        return ValidationError::generic(message);
    }
    ValidationError::invalid(message, path.to_vec())
}

#[cfg(test)]
mod tests;
