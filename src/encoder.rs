//! JSON encoding of response payloads with a nesting guard.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

/// Deepest nesting level kept in an encoded payload.
pub const MAX_DEPTH: usize = 10;

/// Encode `value` as JSON, replacing subtrees nested deeper than
/// [`MAX_DEPTH`] with `null`. Values that fail to serialize degrade to
/// `{"type": <type name>}`.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(encoded) => prune(encoded, 0),
        Err(err) => {
            let type_name = std::any::type_name::<T>();
            warn!(%type_name, error = %err, "value could not be encoded");
            json!({ "type": short_type_name(type_name) })
        }
    }
}

fn prune(value: Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        warn!(depth, "encoder depth limit reached");
        return Value::Null;
    }
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| prune(item, depth + 1)).collect())
        }
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, prune(item, depth + 1)))
                .collect::<Map<String, Value>>(),
        ),
        scalar => scalar,
    }
}

fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}
