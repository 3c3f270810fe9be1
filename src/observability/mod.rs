//! Logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` wins when set;
//! otherwise the configured `LOG_LEVEL` is used.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
