//! Logging setup utilities for the hiroba backend.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for both the application crates and the
/// binary. The log level can be overridden using the `RUST_LOG` environment
/// variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hiroba-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},{}={}",
                    env!("CARGO_PKG_NAME").replace("-", "_"),
                    default_log_level,
                    binary_name.replace("-", "_"),
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
