//! Ignore sets: fully-qualified field and oneof names left out of a digest.

use std::collections::HashSet;

use protohash_schema::validation::is_qualified_member_name;
use protohash_schema::{FieldDescriptor, MessageDescriptor};

use crate::error::HashError;

/// Fully-qualified field and oneof names to leave out of a digest.
///
/// Matching is exact: no wildcards and no prefixes. An ignored field hashes
/// exactly as if it were unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    /// An empty set; nothing is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from names such as `pkg.Message.field` or `pkg.Message.oneof`.
    pub fn from_names<I, S>(names: I) -> Result<Self, HashError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name)?;
        }
        Ok(set)
    }

    /// Adds a name.
    pub fn insert(&mut self, name: impl Into<String>) -> Result<(), HashError> {
        let name = name.into();
        if !is_qualified_member_name(&name) {
            return Err(HashError::InvalidIgnoreName(name));
        }
        self.names.insert(name);
        Ok(())
    }

    /// Exact membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of ignored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether `field` of `message` must be skipped, either by its own name
    /// or by the name of its containing oneof.
    pub fn should_skip(&self, message: &MessageDescriptor, field: &FieldDescriptor) -> bool {
        if self.names.is_empty() {
            return false;
        }
        if let Some(oneof) = message.containing_oneof(field) {
            if self.names.contains(oneof.full_name()) {
                return true;
            }
        }
        self.names.contains(field.full_name())
    }
}
