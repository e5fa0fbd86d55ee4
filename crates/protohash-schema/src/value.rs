use std::collections::HashMap;

use thiserror::Error;

use crate::kind::Kind;
use crate::message::DynamicMessage;

/// Populated content of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// `int32`, `sint32`, `sfixed32`
    I32(i32),
    /// `int64`, `sint64`, `sfixed64`
    I64(i64),
    /// `uint32`, `fixed32`
    U32(u32),
    /// `uint64`, `fixed64`
    U64(u64),
    /// `float`
    F32(f32),
    /// `double`
    F64(f64),
    /// `string`
    String(String),
    /// `bytes`
    Bytes(Vec<u8>),
    /// Enum number.
    EnumNumber(i32),
    /// Nested message (or group).
    Message(Box<DynamicMessage>),
    /// Repeated field content.
    List(Vec<Value>),
    /// Map field content; iteration order carries no meaning.
    Map(HashMap<MapKey, Value>),
}

/// Map key. Keys are restricted to bool, integer and string kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// `bool` key.
    Bool(bool),
    /// `int32`, `sint32`, `sfixed32` key.
    I32(i32),
    /// `int64`, `sint64`, `sfixed64` key.
    I64(i64),
    /// `uint32`, `fixed32` key.
    U32(u32),
    /// `uint64`, `fixed64` key.
    U64(u64),
    /// `string` key.
    String(String),
}

/// Errors raised when populating a [`DynamicMessage`].
#[derive(Debug, Error)]
pub enum ValueError {
    /// The message type has no field by that name.
    #[error("{message} has no field named {field}")]
    UnknownField {
        /// Fully-qualified message name.
        message: String,
        /// Requested field name.
        field: String,
    },
    /// The value does not fit the field's kind or cardinality.
    #[error("value for {field} does not match {expected}")]
    Mismatch {
        /// Fully-qualified field name.
        field: String,
        /// Human readable expectation (`repeated int32`, `map<string, bytes>`).
        expected: String,
    },
    /// The JSON input could not be decoded.
    #[error("invalid JSON for {field}: {reason}")]
    InvalidJson {
        /// Fully-qualified field or message name.
        field: String,
        /// What went wrong.
        reason: String,
    },
}

impl Value {
    /// Whether this value can be stored in a single element of `kind`.
    pub fn matches_kind(&self, kind: &Kind) -> bool {
        match (kind, self) {
            (Kind::Bool, Value::Bool(_)) => true,
            (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, Value::I32(_)) => true,
            (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, Value::I64(_)) => true,
            (Kind::Uint32 | Kind::Fixed32, Value::U32(_)) => true,
            (Kind::Uint64 | Kind::Fixed64, Value::U64(_)) => true,
            (Kind::Float, Value::F32(_)) => true,
            (Kind::Double, Value::F64(_)) => true,
            (Kind::String, Value::String(_)) => true,
            (Kind::Bytes, Value::Bytes(_)) => true,
            (Kind::Enum(_), Value::EnumNumber(_)) => true,
            (Kind::Message(name) | Kind::Group(name), Value::Message(m)) => {
                m.descriptor().full_name() == name
            }
            _ => false,
        }
    }

    /// Whether the value is the zero value of its type.
    ///
    /// Floats count as zero only for `+0.0`; `-0.0` has a distinct bit pattern.
    /// Messages are never zero.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::I32(v) | Value::EnumNumber(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::U32(v) => *v == 0,
            Value::U64(v) => *v == 0,
            Value::F32(v) => v.to_bits() == 0,
            Value::F64(v) => v.to_bits() == 0,
            Value::String(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Message(_) => false,
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
        }
    }

    /// Builds a list value from anything convertible into elements.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl MapKey {
    /// Whether the key can be stored in a map keyed by `kind`.
    pub fn matches_kind(&self, kind: &Kind) -> bool {
        matches!(
            (kind, self),
            (Kind::Bool, MapKey::Bool(_))
                | (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, MapKey::I32(_))
                | (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, MapKey::I64(_))
                | (Kind::Uint32 | Kind::Fixed32, MapKey::U32(_))
                | (Kind::Uint64 | Kind::Fixed64, MapKey::U64(_))
                | (Kind::String, MapKey::String(_))
        )
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    &str => String,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
);

impl From<DynamicMessage> for Value {
    fn from(value: DynamicMessage) -> Self {
        Value::Message(Box::new(value))
    }
}

macro_rules! key_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MapKey {
                fn from(value: $ty) -> Self {
                    MapKey::$variant(value.into())
                }
            }
        )*
    };
}

key_from!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    String => String,
    &str => String,
);

impl<K: Into<MapKey>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
