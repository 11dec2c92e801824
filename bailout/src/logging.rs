//! Development-time tracing for debugging bailout decisions.
//!
//! Dev diagnostics via `RUST_LOG`, output to stderr. The JSON report printed
//! by `bailout check` goes to stdout and is unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset, or to
/// `bailout=debug` when `verbose` is set. Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=bailout=debug cargo run -- check --reason headers
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,bailout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
