//! Accessors for JSON payload fields in assertions.

use serde_json::Value;

pub fn u64_field(value: &Value, key: &str) -> u64 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .unwrap_or_else(|| panic!("expected numeric field `{key}` in {value}"))
}

pub fn array_len(value: &Value, key: &str) -> usize {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or_else(|| panic!("expected array field `{key}` in {value}"))
}
