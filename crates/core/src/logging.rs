//! Logging initialization and configuration.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither `RUST_LOG` nor the config supplies one.
pub const DEFAULT_FILTER: &str = "info,arbor=debug";

/// Initialize the logging system with tracing.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used. Falls
/// back to [`DEFAULT_FILTER`] if `default_filter` does not parse.
///
/// # Example
/// ```no_run
/// arbor_core::init_logging(arbor_core::DEFAULT_FILTER);
/// tracing::info!("scene ready");
/// ```
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
