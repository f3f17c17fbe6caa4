//! Tracing subscriber setup for the binary.
//!
//! The filter comes from `RIDESIM_LOG`, then `RUST_LOG`, and defaults to
//! `warn`. Log lines go to stderr so stdout stays clean for command output.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RIDESIM_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
