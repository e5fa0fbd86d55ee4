//! Diagnostics setup.
//!
//! Log output goes to stderr so stdout carries only digests and listings.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding the filter directives, e.g. `protohash=trace`.
pub const LOG_ENV: &str = "PROTOHASH_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. A malformed filter falls back to the default.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when embedded in tests.
    let _ = Registry::default().with(filter).with(layer).try_init();
}
