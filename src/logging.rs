//! Log subscriber setup
//!
//! Logs go to stderr; stdout carries the MCP protocol.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{Config, Environment};

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(env: Environment) -> &'static str {
    if env.is_debug() { "debug" } else { "info" }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.env)));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(env = %config.env, "logging initialized");
    }
}
