//! Structured logging infrastructure for dashstats

use crate::{DashError, Result};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "dashstats_metrics=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Optional file path for log output; stderr otherwise
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

fn open_log_file(path: &str) -> Result<File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DashError::config_with_source(format!("Cannot open log file {path}"), e))
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`. Stdout is left
/// alone so reports printed by the CLI stay machine-readable.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| DashError::config_with_source("Invalid log level filter", e))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (config.json_format, config.file_path.as_deref()) {
        (true, Some(path)) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_targets)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        (true, None) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (false, Some(path)) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(config.include_targets)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        (false, None) => registry
            .with(
                fmt::layer()
                    .with_target(config.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| DashError::config_with_source("Logging already initialized", e))
}
