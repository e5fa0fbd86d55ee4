//! Hashing options from a TOML file, overridden by command-line flags.

use protohash::{DigestAlg, HashOptions};
use thiserror::Error;

/// Errors loading the options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Config path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid options TOML.
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Config path.
        path: String,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Loads options from `path`, or defaults when no file is given.
pub fn load(path: Option<&str>) -> Result<HashOptions, ConfigError> {
    let Some(path) = path else {
        return Ok(HashOptions::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Applies flag values on top of file options. Ignore names accumulate.
pub fn apply_overrides(
    mut options: HashOptions,
    alg: Option<DigestAlg>,
    ignore: &[String],
    max_depth: Option<usize>,
) -> HashOptions {
    if let Some(alg) = alg {
        options.algorithm = alg;
    }
    options.ignore_fields.extend(ignore.iter().cloned());
    if max_depth.is_some() {
        options.max_depth = max_depth;
    }
    options
}
