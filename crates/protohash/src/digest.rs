//! Digest algorithms and rendered `{alg, b64}` digests.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::sink::{DigestSink, Xxh64Sink};

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// XXH64, seed 0 (the default).
    #[default]
    Xxh64,
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
    /// BLAKE3, with extendable output.
    Blake3,
}

impl DigestAlg {
    /// Creates a fresh sink for this algorithm.
    pub fn new_sink(self) -> Box<dyn DigestSink> {
        match self {
            DigestAlg::Xxh64 => Box::new(Xxh64Sink::new()),
            DigestAlg::Sha256 => Box::<sha2::Sha256>::default(),
            DigestAlg::Blake3 => Box::new(blake3::Hasher::new()),
        }
    }

    /// Canonical lowercase name (`xxh64`, `sha-256`, `blake3`).
    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlg::Xxh64 => "xxh64",
            DigestAlg::Sha256 => "sha-256",
            DigestAlg::Blake3 => "blake3",
        }
    }
}

/// An algorithm name outside `xxh64`, `sha-256` and `blake3`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown digest algorithm '{0}' (expected xxh64, sha-256 or blake3)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for DigestAlg {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xxh64" => Ok(DigestAlg::Xxh64),
            "sha-256" | "sha256" => Ok(DigestAlg::Sha256),
            "blake3" => Ok(DigestAlg::Blake3),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Algorithm + digest bytes, encoded as base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm.
    pub alg: DigestAlg,
    /// Base64URL (no padding) digest bytes.
    #[serde(rename = "b64")]
    pub b64: String,
}

impl Digest {
    /// Wraps raw digest bytes.
    pub fn from_bytes(alg: DigestAlg, bytes: &[u8]) -> Self {
        Self {
            alg,
            b64: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// Raw digest bytes. Fails when `b64` is not base64url without padding,
    /// which can only happen for a digest built or deserialized by hand.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(&self.b64)
    }

    /// Lowercase hex of the digest bytes.
    pub fn to_hex(&self) -> Result<String, base64::DecodeError> {
        self.to_bytes().map(hex::encode)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alg, self.b64)
    }
}
