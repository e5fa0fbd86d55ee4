//! Incremental digest sinks.
//!
//! A sink accepts an ordered stream of byte writes and is finalized by the
//! caller in one of three ways: fixed-width bytes, a 64-bit integer, or an
//! arbitrary-length extendable output. Sinks that cannot produce a given form
//! report [`HashError::SinkUnsupportedOperation`].

use sha2::Digest as _;
use xxhash_rust::xxh64::Xxh64;

use crate::error::HashError;

/// Running hash that canonical bytes are streamed into.
pub trait DigestSink {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Appends bytes to the running hash.
    fn write(&mut self, bytes: &[u8]);

    /// Fixed-width digest of everything written so far.
    fn finish_bytes(&self) -> Vec<u8>;

    /// 64-bit digest, for sinks whose natural output is a `u64`.
    fn finish_u64(&self) -> Result<u64, HashError> {
        Err(HashError::SinkUnsupportedOperation {
            op: "64-bit output",
            sink: self.name(),
        })
    }

    /// Arbitrary-length output, for extendable-output functions.
    fn finish_xof(&self, len: usize) -> Result<Vec<u8>, HashError> {
        let _ = len;
        Err(HashError::SinkUnsupportedOperation {
            op: "extendable output",
            sink: self.name(),
        })
    }
}

/// XXH64 with seed 0. The default sink.
pub struct Xxh64Sink {
    state: Xxh64,
}

impl Xxh64Sink {
    /// Creates a sink with seed 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates a sink with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Xxh64::new(seed),
        }
    }
}

impl Default for Xxh64Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestSink for Xxh64Sink {
    fn name(&self) -> &'static str {
        "xxh64"
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Big-endian bytes of the 64-bit digest.
    fn finish_bytes(&self) -> Vec<u8> {
        self.state.digest().to_be_bytes().to_vec()
    }

    fn finish_u64(&self) -> Result<u64, HashError> {
        Ok(self.state.digest())
    }
}

impl DigestSink for sha2::Sha256 {
    fn name(&self) -> &'static str {
        "sha-256"
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish_bytes(&self) -> Vec<u8> {
        self.clone().finalize().to_vec()
    }
}

impl DigestSink for blake3::Hasher {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish_bytes(&self) -> Vec<u8> {
        self.finalize().as_bytes().to_vec()
    }

    fn finish_xof(&self, len: usize) -> Result<Vec<u8>, HashError> {
        let mut out = vec![0u8; len];
        self.finalize_xof().fill(&mut out);
        Ok(out)
    }
}

/// Records the canonical byte stream verbatim; `finish_bytes` returns it.
impl DigestSink for Vec<u8> {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn finish_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

impl<S: DigestSink + ?Sized> DigestSink for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }

    fn finish_bytes(&self) -> Vec<u8> {
        (**self).finish_bytes()
    }

    fn finish_u64(&self) -> Result<u64, HashError> {
        (**self).finish_u64()
    }

    fn finish_xof(&self, len: usize) -> Result<Vec<u8>, HashError> {
        (**self).finish_xof(len)
    }
}
