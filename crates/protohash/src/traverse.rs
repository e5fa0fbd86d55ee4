//! Reflective, depth-first traversal of a [`DynamicMessage`].

use protohash_schema::{Cardinality, DynamicMessage, FieldDescriptor, Kind, Value};
use tracing::{trace, warn};

use crate::encode;
use crate::error::HashError;
use crate::filter::IgnoreSet;
use crate::order;
use crate::sink::DigestSink;

/// Walks one message tree into a sink.
///
/// The ignore set and depth limit are threaded through every level; nothing
/// outlives the call.
pub(crate) struct Traversal<'a, S: DigestSink + ?Sized> {
    sink: &'a mut S,
    ignore: &'a IgnoreSet,
    max_depth: Option<usize>,
}

impl<'a, S: DigestSink + ?Sized> Traversal<'a, S> {
    pub(crate) fn new(sink: &'a mut S, ignore: &'a IgnoreSet, max_depth: Option<usize>) -> Self {
        Self {
            sink,
            ignore,
            max_depth,
        }
    }

    /// Hashes populated, non-ignored fields in ascending field-number order.
    /// No boundary marker is written before or after the message.
    pub(crate) fn message(&mut self, message: &DynamicMessage, depth: usize) -> Result<(), HashError> {
        let descriptor = message.descriptor();
        let mut populated: Vec<&FieldDescriptor> = descriptor
            .fields()
            .iter()
            .filter(|field| !self.ignore.should_skip(descriptor, field))
            .filter(|field| message.has(field))
            .collect();
        // Declaration order is not number order.
        populated.sort_unstable_by_key(|field| field.number());

        for field in populated {
            trace!(field = field.full_name(), depth, "hashing field");
            self.field(message, field, depth)?;
        }
        Ok(())
    }

    fn field(
        &mut self,
        message: &DynamicMessage,
        field: &FieldDescriptor,
        depth: usize,
    ) -> Result<(), HashError> {
        let Some(value) = message.get(field) else {
            return Ok(());
        };
        match (field.cardinality(), value) {
            (Cardinality::Singular, value) => self.element(field, value, depth),
            (Cardinality::List, Value::List(items)) => {
                for item in items {
                    self.element(field, item, depth)?;
                }
                Ok(())
            }
            (Cardinality::Map { key }, Value::Map(entries)) => {
                order::for_each_entry(field.full_name(), key, entries, |_, v| {
                    self.element(field, v, depth)
                })
            }
            _ => Err(HashError::ValueMismatch {
                field: field.full_name().to_string(),
                kind: field.kind().to_string(),
            }),
        }
    }

    fn element(
        &mut self,
        field: &FieldDescriptor,
        value: &Value,
        depth: usize,
    ) -> Result<(), HashError> {
        match (field.kind(), value) {
            (Kind::Message(_), Value::Message(nested)) => {
                let next = depth + 1;
                if let Some(limit) = self.max_depth {
                    if next > limit {
                        warn!(field = field.full_name(), limit, "message nesting exceeds depth limit");
                        return Err(HashError::DepthExceeded {
                            field: field.full_name().to_string(),
                            limit,
                        });
                    }
                }
                self.message(nested, next)
            }
            (kind, value) => encode::write_scalar(&mut *self.sink, field.full_name(), kind, value),
        }
    }
}
