//! Typed-value codec for the Firestore REST wire format.
//!
//! Firestore documents carry each scalar wrapped in a type tag, e.g.
//! `{"integerValue": "42"}` or `{"stringValue": "Sí"}`. Integer values
//! travel as strings on the wire.

use serde_json::{json, Map, Value};

use crate::domain::assessment::{DocumentValue, RecordDocument};
use crate::ports::StoreError;

/// Encodes one scalar into its tagged wire form.
pub fn encode_value(value: &DocumentValue) -> Value {
    match value {
        DocumentValue::Boolean(b) => json!({ "booleanValue": b }),
        DocumentValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        DocumentValue::Double(d) => json!({ "doubleValue": d }),
        DocumentValue::String(s) => json!({ "stringValue": s }),
    }
}

/// Decodes one tagged wire value back into a scalar.
pub fn decode_value(value: &Value) -> Result<DocumentValue, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::Serialization(format!("Expected a typed value, got {}", value)))?;

    if let Some(b) = object.get("booleanValue").and_then(Value::as_bool) {
        return Ok(DocumentValue::Boolean(b));
    }
    if let Some(raw) = object.get("integerValue") {
        let i = integer_from_wire(raw)?;
        return Ok(DocumentValue::Integer(i));
    }
    if let Some(d) = object.get("doubleValue").and_then(Value::as_f64) {
        return Ok(DocumentValue::Double(d));
    }
    if let Some(s) = object.get("stringValue").and_then(Value::as_str) {
        return Ok(DocumentValue::String(s.to_string()));
    }

    Err(StoreError::Serialization(format!("Unsupported value type: {}", value)))
}

/// Encodes a document into the `{"fields": {...}}` body of a write.
pub fn encode_fields(document: &RecordDocument) -> Value {
    let mut fields = Map::new();
    for (name, value) in document {
        fields.insert(name.clone(), encode_value(value));
    }
    json!({ "fields": Value::Object(fields) })
}

/// Decodes the `fields` member of a fetched document.
pub fn decode_fields(document: &Value) -> Result<RecordDocument, StoreError> {
    let fields = document
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| StoreError::Serialization("Document has no fields member".to_string()))?;

    let mut decoded = RecordDocument::new();
    for (name, value) in fields {
        decoded.insert(name.clone(), decode_value(value)?);
    }
    Ok(decoded)
}

/// Integer values arrive as JSON strings; tolerate plain numbers too.
pub fn integer_from_wire(raw: &Value) -> Result<i64, StoreError> {
    match raw {
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| StoreError::Serialization(format!("Bad integer value '{}': {}", s, e))),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| StoreError::Serialization(format!("Bad integer value {}", n))),
        other => Err(StoreError::Serialization(format!("Bad integer value {}", other))),
    }
}
