//! Purpose: Install the process-wide tracing subscriber for the CLI.
//! Role: Called once from `main`; logs go to stderr so stdout stays JSON-only.
//! Invariants: `RUST_LOG` overrides the default `warn` filter.
//! Invariants: Repeated initialization is a no-op.
use tracing_subscriber::EnvFilter;

pub(crate) fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
