use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a field, or of a map value when the field is a map.
///
/// Enum, message and group kinds carry the fully-qualified name of the
/// referenced type (without a leading dot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// `bool`
    Bool,
    /// `int32`
    Int32,
    /// `sint32` (zig-zag varint)
    Sint32,
    /// `uint32`
    Uint32,
    /// `int64`
    Int64,
    /// `sint64` (zig-zag varint)
    Sint64,
    /// `uint64`
    Uint64,
    /// `fixed32`
    Fixed32,
    /// `sfixed32`
    Sfixed32,
    /// `fixed64`
    Fixed64,
    /// `sfixed64`
    Sfixed64,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// Enumerated integer of the named enum type.
    Enum(String),
    /// Nested message of the named type.
    Message(String),
    /// Legacy group of the named type. Representable but never hashable.
    Group(String),
}

impl Kind {
    /// Returns the protobuf name of the kind (`int32`, `message`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int32 => "int32",
            Kind::Sint32 => "sint32",
            Kind::Uint32 => "uint32",
            Kind::Int64 => "int64",
            Kind::Sint64 => "sint64",
            Kind::Uint64 => "uint64",
            Kind::Fixed32 => "fixed32",
            Kind::Sfixed32 => "sfixed32",
            Kind::Fixed64 => "fixed64",
            Kind::Sfixed64 => "sfixed64",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Enum(_) => "enum",
            Kind::Message(_) => "message",
            Kind::Group(_) => "group",
        }
    }

    /// Whether the kind may key a map (bool, any integer, string).
    pub fn is_valid_map_key(&self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int32
                | Kind::Sint32
                | Kind::Uint32
                | Kind::Int64
                | Kind::Sint64
                | Kind::Uint64
                | Kind::Fixed32
                | Kind::Sfixed32
                | Kind::Fixed64
                | Kind::Sfixed64
                | Kind::String
        )
    }

    /// Name of the referenced message type for message and group kinds.
    pub fn message_type(&self) -> Option<&str> {
        match self {
            Kind::Message(name) | Kind::Group(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Enum(name) | Kind::Message(name) | Kind::Group(name) => {
                write!(f, "{} {}", self.name(), name)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Zero or one value.
    Singular,
    /// Ordered sequence of values.
    List,
    /// Unordered key to value mapping; the field's kind is the value kind.
    Map {
        /// Kind of the map keys.
        key: Kind,
    },
}

/// Whether an unset singular field can be told apart from its zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Presence is tracked: a stored zero value is populated.
    Explicit,
    /// Presence is not tracked: the zero value counts as unset.
    Implicit,
}
