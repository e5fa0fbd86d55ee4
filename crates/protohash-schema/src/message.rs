use std::collections::HashMap;
use std::fmt;

use crate::descriptor::{FieldDescriptor, MessageDescriptor, OneofDescriptor};
use crate::kind::{Cardinality, Presence};
use crate::value::{Value, ValueError};

/// A message instance whose shape is given by a [`MessageDescriptor`].
///
/// Values are kept in a hash map keyed by field number, so the order in which
/// fields were set is not observable.
#[derive(Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: MessageDescriptor,
    values: HashMap<u32, Value>,
}

impl DynamicMessage {
    /// Creates an empty message.
    pub fn new(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            values: HashMap::new(),
        }
    }

    /// The message's type.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// Sets a field by short name, checking the value against the field's kind
    /// and cardinality. Setting a oneof member clears its siblings.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValueError> {
        let descriptor = self.descriptor.clone();
        let field = descriptor
            .field_by_name(name)
            .ok_or_else(|| ValueError::UnknownField {
                message: descriptor.full_name().to_string(),
                field: name.to_string(),
            })?;
        let value = value.into();
        check_value(field, &value)?;

        if let Some(oneof) = field.oneof_index() {
            for sibling in descriptor.fields() {
                if sibling.oneof_index() == Some(oneof) {
                    self.values.remove(&sibling.number());
                }
            }
        }
        self.values.insert(field.number(), value);
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, ValueError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Clears a field by short name.
    pub fn clear(&mut self, name: &str) -> Result<(), ValueError> {
        let number = self
            .descriptor
            .field_by_name(name)
            .map(FieldDescriptor::number)
            .ok_or_else(|| ValueError::UnknownField {
                message: self.descriptor.full_name().to_string(),
                field: name.to_string(),
            })?;
        self.values.remove(&number);
        Ok(())
    }

    /// Whether the field is populated.
    ///
    /// Lists and maps are populated when non-empty. Singular fields with
    /// explicit presence are populated whenever a value is stored; fields with
    /// implicit presence only when the stored value is not the zero value.
    pub fn has(&self, field: &FieldDescriptor) -> bool {
        let Some(value) = self.values.get(&field.number()) else {
            return false;
        };
        match field.cardinality() {
            Cardinality::List | Cardinality::Map { .. } => !value.is_default(),
            Cardinality::Singular => match field.presence() {
                Presence::Explicit => true,
                Presence::Implicit => !value.is_default(),
            },
        }
    }

    /// The stored value of a field, populated or not.
    pub fn get(&self, field: &FieldDescriptor) -> Option<&Value> {
        self.values.get(&field.number())
    }

    /// The stored value of a field by short name.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.descriptor
            .field_by_name(name)
            .and_then(|field| self.get(field))
    }

    /// The populated member of a oneof, if any.
    pub fn which_oneof(&self, oneof: &OneofDescriptor) -> Option<&FieldDescriptor> {
        let index = self
            .descriptor
            .oneofs()
            .iter()
            .position(|o| o.full_name() == oneof.full_name())?;
        self.descriptor
            .fields()
            .iter()
            .find(|f| f.oneof_index() == Some(index) && self.has(f))
    }
}

impl fmt::Debug for DynamicMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.descriptor.full_name());
        for field in self.descriptor.fields() {
            if let Some(value) = self.values.get(&field.number()) {
                s.field(field.name(), value);
            }
        }
        s.finish()
    }
}

fn check_value(field: &FieldDescriptor, value: &Value) -> Result<(), ValueError> {
    let kind = field.kind();
    let ok = match (field.cardinality(), value) {
        (Cardinality::Singular, v) => v.matches_kind(kind),
        (Cardinality::List, Value::List(items)) => items.iter().all(|v| v.matches_kind(kind)),
        (Cardinality::Map { key }, Value::Map(entries)) => entries
            .iter()
            .all(|(k, v)| k.matches_kind(key) && v.matches_kind(kind)),
        _ => false,
    };
    if ok {
        return Ok(());
    }
    let expected = match field.cardinality() {
        Cardinality::Singular => kind.to_string(),
        Cardinality::List => format!("repeated {}", kind),
        Cardinality::Map { key } => format!("map<{}, {}>", key, kind),
    };
    Err(ValueError::Mismatch {
        field: field.full_name().to_string(),
        expected,
    })
}
