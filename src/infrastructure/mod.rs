pub mod log_sink;
pub mod server_impl;

use tracing_subscriber::EnvFilter;

use crate::AnyResult;

/// Operator diagnostics go to stderr, filtered by `RUST_LOG` (default `info`).
/// The request log is a separate file and never goes through here.
pub fn init_logging() -> AnyResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(eyre::Report::msg)
}
