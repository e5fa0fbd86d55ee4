//! Decoding of [`DynamicMessage`]s from JSON objects keyed by field name.
//!
//! The mapping is deliberately small: 64-bit integers accept numbers or
//! decimal strings, bytes are standard base64, enums are numbers, and map
//! keys are parsed from the JSON object keys according to the key kind.
//! `null` leaves a field unset.

use std::collections::HashMap;

use base64::Engine;
use serde_json::Value as Json;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::kind::{Cardinality, Kind};
use crate::message::DynamicMessage;
use crate::value::{MapKey, Value, ValueError};

impl DynamicMessage {
    /// Decodes a message of type `descriptor` from a JSON object.
    pub fn from_json(descriptor: MessageDescriptor, json: &Json) -> Result<Self, ValueError> {
        let object = json.as_object().ok_or_else(|| ValueError::InvalidJson {
            field: descriptor.full_name().to_string(),
            reason: "expected an object".to_string(),
        })?;

        let mut message = DynamicMessage::new(descriptor.clone());
        for (name, item) in object {
            if item.is_null() {
                continue;
            }
            let field = descriptor
                .field_by_name(name)
                .ok_or_else(|| ValueError::UnknownField {
                    message: descriptor.full_name().to_string(),
                    field: name.clone(),
                })?;
            let value = field_from_json(&descriptor, field, item)?;
            message.set(name, value)?;
        }
        Ok(message)
    }
}

fn field_from_json(
    descriptor: &MessageDescriptor,
    field: &FieldDescriptor,
    json: &Json,
) -> Result<Value, ValueError> {
    match field.cardinality() {
        Cardinality::Singular => element_from_json(descriptor, field, field.kind(), json),
        Cardinality::List => {
            let items = json
                .as_array()
                .ok_or_else(|| invalid(field, "expected an array"))?;
            items
                .iter()
                .map(|item| element_from_json(descriptor, field, field.kind(), item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        Cardinality::Map { key } => {
            let entries = json
                .as_object()
                .ok_or_else(|| invalid(field, "expected an object"))?;
            let mut map = HashMap::with_capacity(entries.len());
            for (k, v) in entries {
                let key = key_from_str(field, key, k)?;
                let value = element_from_json(descriptor, field, field.kind(), v)?;
                map.insert(key, value);
            }
            Ok(Value::Map(map))
        }
    }
}

fn element_from_json(
    descriptor: &MessageDescriptor,
    field: &FieldDescriptor,
    kind: &Kind,
    json: &Json,
) -> Result<Value, ValueError> {
    let value = match kind {
        Kind::Bool => Value::Bool(
            json.as_bool()
                .ok_or_else(|| invalid(field, "expected a boolean"))?,
        ),
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => {
            let v = signed(field, json)?;
            Value::I32(i32::try_from(v).map_err(|_| invalid(field, "out of range for 32 bits"))?)
        }
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => Value::I64(signed(field, json)?),
        Kind::Uint32 | Kind::Fixed32 => {
            let v = unsigned(field, json)?;
            Value::U32(u32::try_from(v).map_err(|_| invalid(field, "out of range for 32 bits"))?)
        }
        Kind::Uint64 | Kind::Fixed64 => Value::U64(unsigned(field, json)?),
        Kind::Float => Value::F32(float(field, json)? as f32),
        Kind::Double => Value::F64(float(field, json)?),
        Kind::String => Value::String(
            json.as_str()
                .ok_or_else(|| invalid(field, "expected a string"))?
                .to_string(),
        ),
        Kind::Bytes => {
            let encoded = json
                .as_str()
                .ok_or_else(|| invalid(field, "expected a base64 string"))?;
            Value::Bytes(
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| invalid(field, &e.to_string()))?,
            )
        }
        Kind::Enum(_) => {
            let v = signed(field, json)?;
            Value::EnumNumber(
                i32::try_from(v).map_err(|_| invalid(field, "enum number out of range"))?,
            )
        }
        Kind::Message(type_name) | Kind::Group(type_name) => {
            let nested = descriptor.resolve(type_name).ok_or_else(|| {
                invalid(field, &format!("unknown message type {}", type_name))
            })?;
            Value::Message(Box::new(DynamicMessage::from_json(nested, json)?))
        }
    };
    Ok(value)
}

fn signed(field: &FieldDescriptor, json: &Json) -> Result<i64, ValueError> {
    match json {
        Json::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(field, "expected an integer")),
        Json::String(s) => s
            .parse::<i64>()
            .map_err(|_| invalid(field, "expected an integer string")),
        _ => Err(invalid(field, "expected an integer")),
    }
}

fn unsigned(field: &FieldDescriptor, json: &Json) -> Result<u64, ValueError> {
    match json {
        Json::Number(n) => n
            .as_u64()
            .ok_or_else(|| invalid(field, "expected an unsigned integer")),
        Json::String(s) => s
            .parse::<u64>()
            .map_err(|_| invalid(field, "expected an unsigned integer string")),
        _ => Err(invalid(field, "expected an unsigned integer")),
    }
}

fn float(field: &FieldDescriptor, json: &Json) -> Result<f64, ValueError> {
    match json {
        Json::Number(n) => n.as_f64().ok_or_else(|| invalid(field, "expected a number")),
        Json::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other
                .parse::<f64>()
                .map_err(|_| invalid(field, "expected a number")),
        },
        _ => Err(invalid(field, "expected a number")),
    }
}

fn key_from_str(field: &FieldDescriptor, kind: &Kind, raw: &str) -> Result<MapKey, ValueError> {
    let bad = || invalid(field, &format!("invalid map key '{}'", raw));
    let key = match kind {
        Kind::Bool => match raw {
            "true" => MapKey::Bool(true),
            "false" => MapKey::Bool(false),
            _ => return Err(bad()),
        },
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => MapKey::I32(raw.parse().map_err(|_| bad())?),
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => MapKey::I64(raw.parse().map_err(|_| bad())?),
        Kind::Uint32 | Kind::Fixed32 => MapKey::U32(raw.parse().map_err(|_| bad())?),
        Kind::Uint64 | Kind::Fixed64 => MapKey::U64(raw.parse().map_err(|_| bad())?),
        Kind::String => MapKey::String(raw.to_string()),
        _ => return Err(bad()),
    };
    Ok(key)
}

fn invalid(field: &FieldDescriptor, reason: &str) -> ValueError {
    ValueError::InvalidJson {
        field: field.full_name().to_string(),
        reason: reason.to_string(),
    }
}
