//! Tracing subscriber setup for suite runs.

use crate::config::Settings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber from settings.
///
/// `RUST_LOG` wins over the configured level; `logging.enabled = false`
/// silences everything. Safe to call from every test — later calls are
/// no-ops.
pub fn init(settings: &Settings) {
    let directive = if settings.logging_enabled {
        settings.log_level.clone()
    } else {
        "off".to_string()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
