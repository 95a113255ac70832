//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Fallback when the configured directive doesn't parse.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initializes the fmt subscriber with `filter` (an `EnvFilter` directive
/// such as `"info,horizon_db=debug"`).
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
