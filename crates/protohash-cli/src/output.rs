//! Output formatting utilities.

use protohash::Digest;
use protohash_schema::{Cardinality, FieldDescriptor, MessageDescriptor};
use serde_json::{json, Value};

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// JSON view of a digest: algorithm, base64url and hex.
pub fn digest_json(digest: &Digest, hex: &str) -> Value {
    json!({
        "alg": digest.alg.as_str(),
        "b64": digest.b64,
        "hex": hex,
    })
}

/// Fields of a message type in field-number order.
pub fn fields_by_number(message: &MessageDescriptor) -> Vec<&FieldDescriptor> {
    let mut fields: Vec<&FieldDescriptor> = message.fields().iter().collect();
    fields.sort_by_key(|f| f.number());
    fields
}

/// Human-readable type of a field, e.g. `repeated int32` or `map<string, message pkg.T>`.
pub fn field_type(field: &FieldDescriptor) -> String {
    match field.cardinality() {
        Cardinality::Singular => field.kind().to_string(),
        Cardinality::List => format!("repeated {}", field.kind()),
        Cardinality::Map { key } => format!("map<{}, {}>", key, field.kind()),
    }
}

/// Formats a field as a table row.
pub fn format_field_row(message: &MessageDescriptor, field: &FieldDescriptor) -> String {
    let oneof = message
        .containing_oneof(field)
        .map(|o| o.name())
        .unwrap_or("");
    format!(
        "  {:>6}  {:<24} {:<32} {}",
        field.number(),
        field.name(),
        field_type(field),
        oneof
    )
}
