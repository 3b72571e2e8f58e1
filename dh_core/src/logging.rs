//! Structured logging setup for the command-line tools.
//!
//! Log output goes to stderr so stdout only carries the printed results.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set. Call once,
/// early in `main()`; a second call panics.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
