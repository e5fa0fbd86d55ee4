use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::builder::{FileSchema, Label, MessageSchema};
use crate::kind::{Cardinality, Kind, Presence};
use crate::validation::{validate_full_name, validate_identifier, SchemaError, MAX_FIELD_NUMBER};

/// Immutable set of message descriptors.
///
/// Cloning is cheap; all clones share the same descriptors.
#[derive(Clone)]
pub struct DescriptorPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    messages: Vec<MessageInner>,
    by_name: HashMap<String, usize>,
}

struct MessageInner {
    name: String,
    full_name: String,
    fields: Vec<FieldDescriptor>,
    oneofs: Vec<OneofDescriptor>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
}

/// Descriptor of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    full_name: String,
    number: u32,
    kind: Kind,
    cardinality: Cardinality,
    presence: Presence,
    oneof: Option<usize>,
}

impl FieldDescriptor {
    /// Short field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name, `package.Message.field`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Field number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Element kind (value kind for maps).
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Singular, list or map.
    pub fn cardinality(&self) -> &Cardinality {
        &self.cardinality
    }

    /// Presence tracking of a singular field.
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Index of the containing oneof within its message.
    pub fn oneof_index(&self) -> Option<usize> {
        self.oneof
    }

    /// Whether the field is a list.
    pub fn is_list(&self) -> bool {
        matches!(self.cardinality, Cardinality::List)
    }

    /// Whether the field is a map.
    pub fn is_map(&self) -> bool {
        matches!(self.cardinality, Cardinality::Map { .. })
    }
}

/// Descriptor of a oneof group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofDescriptor {
    name: String,
    full_name: String,
}

impl OneofDescriptor {
    /// Short oneof name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name, `package.Message.oneof`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// Handle to one message type inside a [`DescriptorPool`].
#[derive(Clone)]
pub struct MessageDescriptor {
    pool: DescriptorPool,
    index: usize,
}

impl MessageDescriptor {
    fn inner(&self) -> &MessageInner {
        &self.pool.inner.messages[self.index]
    }

    /// Short message name (`Outer.Inner` for nested types).
    pub fn name(&self) -> &str {
        &self.inner().name
    }

    /// Fully-qualified message name.
    pub fn full_name(&self) -> &str {
        &self.inner().full_name
    }

    /// Fields in declaration order. Declaration order is not number order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.inner().fields
    }

    /// Looks a field up by short name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        let inner = self.inner();
        inner.by_name.get(name).map(|&i| &inner.fields[i])
    }

    /// Looks a field up by number.
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        let inner = self.inner();
        inner.by_number.get(&number).map(|&i| &inner.fields[i])
    }

    /// Oneofs in declaration order.
    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.inner().oneofs
    }

    /// The oneof containing `field`, if any.
    pub fn containing_oneof(&self, field: &FieldDescriptor) -> Option<&OneofDescriptor> {
        field.oneof.and_then(|i| self.inner().oneofs.get(i))
    }

    /// Resolves another message type from the same pool.
    pub fn resolve(&self, full_name: &str) -> Option<MessageDescriptor> {
        self.pool.message(full_name)
    }

    /// The owning pool.
    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }
}

impl PartialEq for MessageDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pool.inner, &other.pool.inner) && self.index == other.index
    }
}

impl fmt::Debug for MessageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageDescriptor")
            .field(&self.full_name())
            .finish()
    }
}

impl fmt::Debug for DescriptorPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.messages.iter().map(|m| &m.full_name))
            .finish()
    }
}

impl DescriptorPool {
    /// Builds and validates a pool from file declarations.
    pub fn build<I>(files: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = FileSchema>,
    {
        let mut inner = PoolInner {
            messages: Vec::new(),
            by_name: HashMap::new(),
        };
        for file in files {
            if !file.package.is_empty() {
                validate_full_name("package", &file.package)?;
            }
            for message in &file.messages {
                inner.add_message(&file.package, "", message)?;
            }
        }
        inner.check_references()?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Looks a message type up by fully-qualified name.
    pub fn message(&self, full_name: &str) -> Option<MessageDescriptor> {
        self.inner
            .by_name
            .get(full_name)
            .map(|&index| MessageDescriptor {
                pool: self.clone(),
                index,
            })
    }

    /// All message types in declaration order.
    pub fn messages(&self) -> impl Iterator<Item = MessageDescriptor> + '_ {
        (0..self.inner.messages.len()).map(move |index| MessageDescriptor {
            pool: self.clone(),
            index,
        })
    }

    /// Number of message types.
    pub fn len(&self) -> usize {
        self.inner.messages.len()
    }

    /// Whether the pool declares no message types.
    pub fn is_empty(&self) -> bool {
        self.inner.messages.is_empty()
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", scope, name)
    }
}

impl PoolInner {
    fn add_message(
        &mut self,
        scope: &str,
        parent: &str,
        schema: &MessageSchema,
    ) -> Result<(), SchemaError> {
        validate_identifier("message", &schema.name)?;
        let full_name = qualify(scope, &schema.name);
        if self.by_name.contains_key(&full_name) {
            return Err(SchemaError::DuplicateMessage(full_name));
        }

        let mut oneofs = Vec::with_capacity(schema.oneofs.len());
        for name in &schema.oneofs {
            validate_identifier("oneof", name)?;
            oneofs.push(OneofDescriptor {
                name: name.clone(),
                full_name: qualify(&full_name, name),
            });
        }

        let mut fields = Vec::with_capacity(schema.fields.len());
        let mut by_name = HashMap::with_capacity(schema.fields.len());
        let mut by_number = HashMap::with_capacity(schema.fields.len());
        for field in &schema.fields {
            validate_identifier("field", &field.name)?;
            let field_full_name = qualify(&full_name, &field.name);

            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(SchemaError::InvalidFieldNumber {
                    field: field_full_name,
                    number: field.number,
                });
            }
            if by_name.contains_key(&field.name) {
                return Err(SchemaError::DuplicateFieldName {
                    message: full_name,
                    field: field.name.clone(),
                });
            }
            if by_number.contains_key(&field.number) {
                return Err(SchemaError::DuplicateFieldNumber {
                    message: full_name,
                    number: field.number,
                });
            }
            if let Kind::Enum(name) | Kind::Message(name) | Kind::Group(name) = &field.kind {
                validate_full_name("type", name)?;
            }

            let cardinality = match (&field.map_key, field.label) {
                (Some(key), Label::Implicit) => {
                    if !key.is_valid_map_key() {
                        return Err(SchemaError::InvalidMapKey {
                            field: field_full_name,
                            kind: key.clone(),
                        });
                    }
                    Cardinality::Map { key: key.clone() }
                }
                (Some(_), _) => return Err(SchemaError::InvalidMapLabel(field_full_name)),
                (None, Label::Repeated) => Cardinality::List,
                (None, _) => Cardinality::Singular,
            };

            let oneof = match &field.oneof {
                Some(name) => {
                    let index = schema.oneofs.iter().position(|o| o == name).ok_or_else(|| {
                        SchemaError::UnknownOneof {
                            field: field_full_name.clone(),
                            oneof: name.clone(),
                        }
                    })?;
                    if cardinality != Cardinality::Singular {
                        return Err(SchemaError::OneofCardinality(field_full_name));
                    }
                    Some(index)
                }
                None => None,
            };

            let presence = if cardinality == Cardinality::Singular
                && (field.label == Label::Optional
                    || oneof.is_some()
                    || field.kind.message_type().is_some())
            {
                Presence::Explicit
            } else {
                Presence::Implicit
            };

            by_name.insert(field.name.clone(), fields.len());
            by_number.insert(field.number, fields.len());
            fields.push(FieldDescriptor {
                name: field.name.clone(),
                full_name: field_full_name,
                number: field.number,
                kind: field.kind.clone(),
                cardinality,
                presence,
                oneof,
            });
        }

        let name = qualify(parent, &schema.name);
        self.by_name.insert(full_name.clone(), self.messages.len());
        self.messages.push(MessageInner {
            name: name.clone(),
            full_name: full_name.clone(),
            fields,
            oneofs,
            by_name,
            by_number,
        });

        for nested in &schema.messages {
            self.add_message(&full_name, &name, nested)?;
        }
        Ok(())
    }

    fn check_references(&self) -> Result<(), SchemaError> {
        for message in &self.messages {
            for field in &message.fields {
                if let Some(type_name) = field.kind.message_type() {
                    if !self.by_name.contains_key(type_name) {
                        return Err(SchemaError::UnknownMessageType {
                            field: field.full_name.clone(),
                            type_name: type_name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
