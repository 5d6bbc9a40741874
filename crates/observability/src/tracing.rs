//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process: JSON lines to stdout, level taken
/// from `RUST_LOG` with an `info` fallback.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with an explicit fallback filter for when `RUST_LOG` is
/// unset. Subsequent calls are no-ops.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
