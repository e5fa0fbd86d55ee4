use serde::{Deserialize, Serialize};

use crate::kind::Kind;

/// Field label as written in a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Plain proto3 field without presence tracking.
    #[default]
    Implicit,
    /// `optional` field with explicit presence.
    Optional,
    /// `repeated` field.
    Repeated,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Short field name.
    pub name: String,
    /// Field number.
    pub number: u32,
    /// Field kind, or the value kind for maps.
    pub kind: Kind,
    /// Label; ignored for map fields except for validation.
    #[serde(default)]
    pub label: Label,
    /// Key kind when the field is a map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_key: Option<Kind>,
    /// Name of the containing oneof, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneof: Option<String>,
}

impl FieldSchema {
    /// Declares a plain singular field.
    pub fn new(name: impl Into<String>, number: u32, kind: Kind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            label: Label::Implicit,
            map_key: None,
            oneof: None,
        }
    }

    /// Marks the field `optional`.
    pub fn optional(mut self) -> Self {
        self.label = Label::Optional;
        self
    }

    /// Marks the field `repeated`.
    pub fn repeated(mut self) -> Self {
        self.label = Label::Repeated;
        self
    }

    /// Turns the field into a map keyed by `key`; `kind` becomes the value kind.
    pub fn map(mut self, key: Kind) -> Self {
        self.map_key = Some(key);
        self
    }

    /// Places the field in the named oneof.
    pub fn in_oneof(mut self, oneof: impl Into<String>) -> Self {
        self.oneof = Some(oneof.into());
        self
    }
}

/// One message declaration, possibly with nested messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// Short message name.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    /// Oneof names in declaration order.
    #[serde(default)]
    pub oneofs: Vec<String>,
    /// Nested message types, named `Outer.Inner`.
    #[serde(default)]
    pub messages: Vec<MessageSchema>,
}

impl MessageSchema {
    /// Starts an empty message declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            oneofs: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares a oneof.
    pub fn oneof(mut self, name: impl Into<String>) -> Self {
        self.oneofs.push(name.into());
        self
    }

    /// Declares a nested message type.
    pub fn message(mut self, message: MessageSchema) -> Self {
        self.messages.push(message);
        self
    }
}

/// A package worth of message declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSchema {
    /// Dotted package name; may be empty.
    #[serde(default)]
    pub package: String,
    /// Top-level messages.
    #[serde(default)]
    pub messages: Vec<MessageSchema>,
}

impl FileSchema {
    /// Starts a file in the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a top-level message.
    pub fn message(mut self, message: MessageSchema) -> Self {
        self.messages.push(message);
        self
    }
}
