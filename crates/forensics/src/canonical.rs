//! Canonical serialization for hash input.
//!
//! Deterministic, order-independent encoding of store documents: object keys
//! are sorted lexicographically, array order is preserved (array order is
//! semantically meaningful, e.g. conversation logs). The output is only ever
//! fed to the hash boundary, never displayed or persisted.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanonicalError {
    #[error("value cannot be canonicalized: {0}")]
    Unserializable(#[from] serde_json::Error),
}

/// Canonicalize a JSON value.
///
/// Two objects with identical key/value pairs in different insertion order
/// produce identical output. Pure and total over `serde_json::Value`.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonicalize any serializable value.
///
/// Fails loudly on input that has no JSON representation (e.g. non-finite
/// floats, map keys that are not strings) rather than silently coercing; a
/// silently altered serialization would produce a hash that does not mean
/// what callers expect.
pub fn canonicalize_struct<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    let json = serde_json::to_value(value)?;
    Ok(canonicalize(&json))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        // Display on a string Value emits the standard JSON-escaped form
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
    }
}
