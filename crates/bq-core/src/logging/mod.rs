//! Structured logging for bq-core.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - JSON lines for automation
//!
//! stdout is reserved for command payloads (HTML, token maps, splits);
//! all log output goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Must be called once at startup. A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let filter = if config.level_from_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()))
    } else {
        EnvFilter::new(config.directives())
    };

    let result = match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Generate a unique id for one render or dialog run.
pub fn generate_render_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("render-{}", &uuid.simple().to_string()[..12])
}
