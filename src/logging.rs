// Logging setup.
// Structured tracing output to stderr, filtered through RUST_LOG.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{MutualsError, Result};

/// Initialize the tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `warn` so JSON output on stdout stays clean.
/// `verbose` raises the default to `debug` for this crate.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<()> {
    let default = if verbose { "warn,mutuals=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| MutualsError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized).
pub fn init_test() {
    let _ = init(false);
}
