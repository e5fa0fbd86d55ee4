//! Schema view and dynamic messages consumed by the protohash canonical hasher.
//!
//! Descriptors are immutable once built and are shared behind an `Arc`, so a
//! single [`DescriptorPool`] can serve any number of concurrent digest
//! computations. Messages are plain owned values; presence semantics
//! (explicit vs implicit) are decided here and nowhere else.
//!
#![deny(missing_docs)]

/// Declarative schema input (`FileSchema`, `MessageSchema`, `FieldSchema`).
pub mod builder;
/// Immutable descriptors and the pool that owns them.
pub mod descriptor;
/// Field kinds, cardinalities and presence.
pub mod kind;
/// Dynamic messages built against a descriptor.
pub mod message;
/// JSON decoding of dynamic messages.
pub mod json;
/// Validation helpers and schema errors.
pub mod validation;
/// Field values and map keys.
pub mod value;

pub use builder::{FieldSchema, FileSchema, Label, MessageSchema};
pub use descriptor::{DescriptorPool, FieldDescriptor, MessageDescriptor, OneofDescriptor};
pub use kind::{Cardinality, Kind, Presence};
pub use message::DynamicMessage;
pub use validation::SchemaError;
pub use value::{MapKey, Value, ValueError};
