//! Top-level digest entry points: [`compute_digest`] and the configured [`Hasher`].

use protohash_schema::DynamicMessage;
use tracing::debug;

use crate::digest::{Digest, DigestAlg};
use crate::error::HashError;
use crate::filter::IgnoreSet;
use crate::options::HashOptions;
use crate::sink::DigestSink;
use crate::traverse::Traversal;

/// Streams the canonical bytes of `message` into `sink`.
///
/// Fails with [`HashError::InvalidInput`] when `message` is `None`. On success
/// the caller finalizes the sink. Recursion is unbounded; cyclic data cannot be
/// built from owned [`DynamicMessage`]s, but arbitrarily deep input can, so
/// untrusted input should go through [`Hasher::with_max_depth`].
///
/// # Example
///
/// ```rust
/// use protohash::{compute_digest, IgnoreSet};
/// use protohash_schema::{DescriptorPool, DynamicMessage, FieldSchema, FileSchema, Kind, MessageSchema};
///
/// let pool = DescriptorPool::build([FileSchema::new("demo").message(
///     MessageSchema::new("Pair")
///         .field(FieldSchema::new("name", 1, Kind::String))
///         .field(FieldSchema::new("count", 2, Kind::Int32)),
/// )])?;
/// let message = DynamicMessage::new(pool.message("demo.Pair").unwrap())
///     .with("count", 5i32)?
///     .with("name", "ab")?;
///
/// let mut recorded: Vec<u8> = Vec::new();
/// compute_digest(Some(&message), &IgnoreSet::new(), &mut recorded)?;
/// assert_eq!(recorded, [0x02, b'a', b'b', 0x05]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compute_digest<S: DigestSink + ?Sized>(
    message: Option<&DynamicMessage>,
    ignore: &IgnoreSet,
    sink: &mut S,
) -> Result<(), HashError> {
    hash_with_limit(message, ignore, None, sink)
}

fn hash_with_limit<S: DigestSink + ?Sized>(
    message: Option<&DynamicMessage>,
    ignore: &IgnoreSet,
    max_depth: Option<usize>,
    sink: &mut S,
) -> Result<(), HashError> {
    let message = message.ok_or(HashError::InvalidInput)?;
    debug!(
        message = message.descriptor().full_name(),
        fields = message.descriptor().fields().len(),
        sink = sink.name(),
        ignored = ignore.len(),
        "computing canonical digest"
    );
    Traversal::new(sink, ignore, max_depth).message(message, 0)
}

/// Reusable digest configuration: algorithm, ignore set and depth limit.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    algorithm: DigestAlg,
    ignore: IgnoreSet,
    max_depth: Option<usize>,
}

impl Hasher {
    /// XXH64, nothing ignored, unbounded depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hasher from loaded options, validating ignore names.
    pub fn from_options(options: &HashOptions) -> Result<Self, HashError> {
        Ok(Self {
            algorithm: options.algorithm,
            ignore: IgnoreSet::from_names(options.ignore_fields.iter().cloned())?,
            max_depth: options.max_depth,
        })
    }

    /// Selects the digest algorithm.
    pub fn with_algorithm(mut self, algorithm: DigestAlg) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Adds fully-qualified field or oneof names to ignore.
    pub fn with_ignore_fields<I, S>(mut self, names: I) -> Result<Self, HashError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.ignore.insert(name)?;
        }
        Ok(self)
    }

    /// Fails with [`HashError::DepthExceeded`] beyond `limit` levels of nesting.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Selected algorithm.
    pub fn algorithm(&self) -> DigestAlg {
        self.algorithm
    }

    /// Current ignore set.
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Streams canonical bytes into a caller-supplied sink.
    pub fn hash_into<S: DigestSink + ?Sized>(
        &self,
        message: &DynamicMessage,
        sink: &mut S,
    ) -> Result<(), HashError> {
        hash_with_limit(Some(message), &self.ignore, self.max_depth, sink)
    }

    /// 64-bit digest. Only XXH64 supports it.
    pub fn sum64(&self, message: &DynamicMessage) -> Result<u64, HashError> {
        self.finish(message, |sink| sink.finish_u64())
    }

    /// Fixed-width digest.
    pub fn sum(&self, message: &DynamicMessage) -> Result<Digest, HashError> {
        let bytes = self.finish(message, |sink| Ok(sink.finish_bytes()))?;
        Ok(Digest::from_bytes(self.algorithm, &bytes))
    }

    /// Arbitrary-length digest. Only BLAKE3 supports it.
    pub fn sum_xof(&self, message: &DynamicMessage, len: usize) -> Result<Vec<u8>, HashError> {
        self.finish(message, |sink| sink.finish_xof(len))
    }

    /// The canonical byte stream itself, as it would be fed to the sink.
    pub fn canonical_bytes(&self, message: &DynamicMessage) -> Result<Vec<u8>, HashError> {
        let mut recorded = Vec::new();
        self.hash_into(message, &mut recorded)?;
        Ok(recorded)
    }

    fn finish<T>(
        &self,
        message: &DynamicMessage,
        extract: impl FnOnce(&dyn DigestSink) -> Result<T, HashError>,
    ) -> Result<T, HashError> {
        let mut sink = self.algorithm.new_sink();
        self.hash_into(message, &mut *sink)?;
        let out = extract(&*sink);
        debug!(algorithm = %self.algorithm, ok = out.is_ok(), "digest finalized");
        out
    }
}
