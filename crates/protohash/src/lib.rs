//! Deterministic digests of schema-described messages.
//!
//! Two messages with the same semantic content always produce the same
//! canonical byte stream, whatever order their fields were set in and however
//! their maps iterate. The byte stream is a one-way hash input, not a wire
//! format: it has no field tags, no length prefixes for nested messages and no
//! end markers.
//!
//! Canonical profile:
//! - fields in ascending field-number order, unset and ignored fields skipped
//! - list elements in list order, map values in key order
//! - scalars encoded per kind (varint, zig-zag, fixed little-endian, length-prefixed)
//! - nested messages inlined recursively
//!
#![deny(missing_docs)]

/// Precompiled per-type hashing contract.
pub mod compiled;
/// Digest algorithms and rendered digests.
pub mod digest;
/// Canonical scalar encoding primitives.
pub mod encode;
/// Error types.
pub mod error;
/// Ignore sets.
pub mod filter;
/// Top-level entry points.
pub mod hasher;
/// Serializable hashing options.
pub mod options;
/// Map key ordering.
pub mod order;
/// Digest sinks.
pub mod sink;
mod traverse;

pub use compiled::HashPb;
pub use digest::{Digest, DigestAlg, UnknownAlgorithm};
pub use error::HashError;
pub use filter::IgnoreSet;
pub use hasher::{compute_digest, Hasher};
pub use options::HashOptions;
pub use sink::{DigestSink, Xxh64Sink};
