//! Sentinel cleaning for exported records.
//!
//! The relational exporter writes "no data" as one of three string
//! placeholders instead of JSON null. Cleaning normalizes those placeholders
//! at every nesting depth before anything is staged for the store.

use serde_json::{Map, Value};

/// String values the exporter uses to mean "no data".
const SENTINELS: &[&str] = &["", "null", "-"];

/// Replace sentinel strings with null in every field of a record.
///
/// Pure and idempotent: takes ownership, returns a new structure, and never
/// touches the rest of the bundle. Recurses into nested objects and arrays,
/// so sentinel strings inside array elements are normalized too.
pub fn clean_record(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(name, value)| (name, clean_value(value)))
        .collect()
}

/// Clean a single value at any depth.
pub fn clean_value(value: Value) -> Value {
    match value {
        Value::String(text) if SENTINELS.contains(&text.as_str()) => Value::Null,
        Value::Object(record) => Value::Object(clean_record(record)),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_value).collect()),
        other => other,
    }
}
