//! Tracing subscriber setup.
//!
//! `RUST_LOG` overrides the configured filter. Production logs are JSON, one
//! object per line; other environments use the human-readable formatter.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the filter: `RUST_LOG` if set and valid, else `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber for the server.
pub fn init(config: &ServerConfig) -> Result<(), InitError> {
    let filter = env_filter(&config.log_level);

    if config.is_production() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .try_init()
    }
}

/// Installs a verbose subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
