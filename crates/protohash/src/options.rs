//! Serde-backed hashing options: algorithm, ignore names and depth limit.

use serde::{Deserialize, Serialize};

use crate::digest::DigestAlg;

/// Hashing options, typically loaded from a config file.
///
/// ```toml
/// algorithm = "sha-256"
/// ignore_fields = ["acme.v1.Doc.updated_at", "acme.v1.Doc.body"]
/// max_depth = 64
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashOptions {
    /// Digest algorithm; `xxh64` unless set.
    pub algorithm: DigestAlg,
    /// Fully-qualified field or oneof names to leave out.
    pub ignore_fields: Vec<String>,
    /// Fail with `DepthExceeded` past this many levels of nesting. Unbounded when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}
