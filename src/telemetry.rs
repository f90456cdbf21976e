//! Tracing subscriber setup shared by the binary.

use crate::config::LogConfig;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. With
/// `log.json` set, events are written as JSON lines.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = env_filter(&config.filter);

    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_line_number(true).with_file(true).try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
