use thiserror::Error;

/// Errors returned by digest computation.
///
/// Every variant raised during traversal names the fully-qualified field being
/// processed. A failed computation never yields a partial digest.
#[derive(Debug, Error)]
pub enum HashError {
    /// The top-level message was absent.
    #[error("invalid message")]
    InvalidInput,
    /// The schema declares a kind the encoder has no rule for.
    #[error("unsupported field kind {kind} at {field}")]
    UnsupportedKind {
        /// Fully-qualified field name.
        field: String,
        /// Offending kind.
        kind: String,
    },
    /// A stored value does not match the declared kind.
    #[error("value of {field} does not match declared kind {kind}")]
    ValueMismatch {
        /// Fully-qualified field name.
        field: String,
        /// Declared kind.
        kind: String,
    },
    /// The digest sink cannot produce the requested output.
    #[error("{op} is not supported by the {sink} hash function")]
    SinkUnsupportedOperation {
        /// Requested operation.
        op: &'static str,
        /// Sink name.
        sink: &'static str,
    },
    /// Nesting went deeper than the configured limit.
    #[error("recursion depth limit {limit} exceeded at {field}")]
    DepthExceeded {
        /// Fully-qualified field holding the too-deep message.
        field: String,
        /// Configured limit.
        limit: usize,
    },
    /// An ignore entry is not a dotted, fully-qualified name.
    #[error("invalid ignore field name '{0}'")]
    InvalidIgnoreName(String),
}
