use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

fn filter(default_level: &str) -> EnvFilter {
    // RUST_LOG wins over the default level
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber, or report that one is already installed.
///
/// Records emitted through the `log` facade (which is what the builder crates use)
/// are forwarded by the subscriber's `tracing-log` bridge.
pub fn try_init_logger_with(default_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .with(filter(default_level))
        .try_init()
}

pub fn try_init_logger() -> Result<(), TryInitError> {
    try_init_logger_with(DEFAULT_LEVEL)
}

/// Install the global subscriber. Calling it twice is a no-op apart from a debug
/// event on the already installed subscriber.
pub fn init_logger() {
    if let Err(err) = try_init_logger() {
        tracing::debug!("logger already initialised: {err}");
    }
}
