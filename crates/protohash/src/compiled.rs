//! Contract for precompiled, per-type hashing routines.
//!
//! A generated (or hand-written) implementation visits its fields in ascending
//! field-number order, checks each fully-qualified field name (and oneof name)
//! against the ignore set, and writes values with the primitives in
//! [`encode`](crate::encode). Message-typed fields call the nested type's
//! routine by name, which is what lets self-referential types terminate at the
//! routine boundary. The output must match the reflective traversal byte for
//! byte.

use protohash_schema::DynamicMessage;

use crate::error::HashError;
use crate::filter::IgnoreSet;
use crate::sink::DigestSink;
use crate::traverse::Traversal;

/// Types that can stream their canonical bytes into a sink.
pub trait HashPb {
    /// Writes the canonical bytes of `self`, skipping ignored fields.
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError>;
}

impl HashPb for DynamicMessage {
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError> {
        Traversal::new(sink, ignore, None).message(self, 0)
    }
}

/// Absent messages contribute nothing, as with a nil receiver.
impl<T: HashPb> HashPb for Option<T> {
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError> {
        match self {
            Some(inner) => inner.hash_pb(sink, ignore),
            None => Ok(()),
        }
    }
}

impl<T: HashPb + ?Sized> HashPb for Box<T> {
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError> {
        (**self).hash_pb(sink, ignore)
    }
}
