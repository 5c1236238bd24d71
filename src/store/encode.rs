//! JSON → Firestore typed-value encoding.
//!
//! The REST commit endpoint does not accept bare JSON documents: every field
//! is wrapped in a typed value (`stringValue`, `integerValue`, ...), with
//! 64-bit integers carried as decimal strings.

use serde_json::{Map, Number, Value, json};

/// Encode a record's fields for the `fields` member of a document payload.
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

/// Encode one JSON value as a Firestore typed value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => encode_number(number),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

fn encode_number(number: &Number) -> Value {
    if let Some(int) = number.as_i64() {
        json!({ "integerValue": int.to_string() })
    } else if let Some(int) = number.as_u64() {
        json!({ "integerValue": int.to_string() })
    } else {
        json!({ "doubleValue": number.as_f64() })
    }
}
