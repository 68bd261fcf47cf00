//! Helpers for the loosely-typed values stored by custom fields.
//!
//! Stored values arrive as JSON. Field rendering treats them the way the
//! field storage layer does: `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}`
//! are all "empty", and scalars convert to strings without quotes.

use serde_json::Map;
use serde_json::Value;

/// Returns true for empty values.
pub fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0),
		Value::String(s) => s.is_empty() || s == "0",
		Value::Array(a) => a.is_empty(),
		Value::Object(o) => o.is_empty(),
	}
}

pub fn is_truthy(value: &Value) -> bool {
	!is_falsy(value)
}

/// Scalar string conversion. Arrays and objects convert to an empty string.
pub fn to_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(true) => "1".to_string(),
		Value::Bool(false) => String::new(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => s.clone(),
		Value::Array(_) | Value::Object(_) => String::new(),
	}
}

/// Reads an integer id from a number or a numeric string. Anything else is
/// `0`.
pub fn to_id(value: &Value) -> u64 {
	match value {
		Value::Number(n) => {
			n.as_u64()
				.or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
				.unwrap_or(0)
		}
		Value::String(s) => s.trim().parse().unwrap_or(0),
		_ => 0,
	}
}

/// Returns the string form of `key` inside an object value, or an empty
/// string.
pub fn text_at(value: &Value, key: &str) -> String {
	value.get(key).map(to_text).unwrap_or_default()
}

pub fn id_at(value: &Value, key: &str) -> u64 {
	value.get(key).map_or(0, to_id)
}

/// Wraps anything that is not a list in a one-element list.
pub fn as_list(value: &Value) -> Vec<Value> {
	match value {
		Value::Array(items) => items.clone(),
		other => vec![other.clone()],
	}
}

/// True when `value` is an object containing `key`.
pub fn has_key(value: &Value, key: &str) -> bool {
	value.as_object().is_some_and(|o| o.contains_key(key))
}

pub(crate) fn object(pairs: &[(&str, Value)]) -> Value {
	let mut map = Map::new();
	for (key, value) in pairs {
		map.insert((*key).to_string(), value.clone());
	}
	Value::Object(map)
}
