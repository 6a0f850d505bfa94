//! Tracing subscriber setup
//!
//! Logs go to stderr so rendered JSON on stdout stays clean. `RUST_LOG`
//! takes precedence over the `-v`/`-q` flags.

use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Build the filter for a verbosity level, honouring `RUST_LOG` if set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
