//! Tracing setup. stdout carries protocol frames, so every log line goes to stderr.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Honors `RUST_LOG`; safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// One structured timing line per scout invocation (`scope = "command"`)
/// or tool call (`scope = "tool"`).
pub fn log_timing(scope: &'static str, name: &str, elapsed: Duration, ok: bool) {
    tracing::info!(scope, name, elapsed_ms = elapsed.as_millis() as u64, ok, "timing");
}
