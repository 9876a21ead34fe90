//! Structured logging setup for binaries and integration tests.
//!
//! The crate itself only emits `tracing` events; it never initializes a
//! subscriber (that would fight with a host application's own setup). This
//! module is a convenience for the `demos/` binaries and `tests/` suites.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG`
/// (`agentspace=debug` if unset). Safe to call more than once; subsequent
/// calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agentspace=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
