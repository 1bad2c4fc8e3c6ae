//! Logging setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Initializes the process-wide tracing subscriber.
///
/// Respects `RUST_LOG` when set and defaults to `info` otherwise. Safe to
/// call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
