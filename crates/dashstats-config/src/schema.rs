//! Configuration schema definitions using serde with validation attributes.

use dashstats_common::logging::LoggingConfig as LoggingSetup;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main configuration structure for dashstats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    #[validate]
    pub database: DatabaseConfig,
    /// Dashboard report settings.
    #[validate]
    pub dashboard: DashboardConfig,
    /// Logging configuration.
    #[validate]
    pub logging: LoggingConfig,
}

/// Relational store connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. `sqlite://dashstats.db`.
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    #[validate(custom(
        function = "crate::validation::validate_database_url",
        message = "Database URL must use the sqlite scheme"
    ))]
    pub url: String,
    /// Maximum number of pooled connections.
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,
    /// How long to wait for a pooled connection, in seconds.
    #[validate(range(min = 1, max = 60, message = "Connection timeout must be between 1 and 60 seconds"))]
    pub connection_timeout_seconds: u64,
    /// Whether to create missing tables when opening the store.
    pub create_schema: bool,
}

/// Defaults applied by the dashboard operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of rows returned by recent sales when the caller gives no limit.
    #[validate(range(min = 1, max = 100, message = "Recent sales limit must be between 1 and 100"))]
    pub recent_sales_limit: usize,
    /// Number of rows returned by popular components when the caller gives no limit.
    #[validate(range(min = 1, max = 100, message = "Popular components limit must be between 1 and 100"))]
    pub popular_components_limit: usize,
    /// A component created within this many days is flagged as new.
    #[validate(range(min = 1, max = 365, message = "New component window must be between 1 and 365 days"))]
    pub new_component_window_days: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Optional log file path.
    pub file: Option<String>,
    /// Whether to include the module target in each line.
    pub include_targets: bool,
}

impl LoggingConfig {
    /// Converts to the subscriber settings understood by `dashstats_common::logging`.
    pub fn to_setup(&self) -> LoggingSetup {
        LoggingSetup {
            level: self.level.clone(),
            json_format: self.json,
            file_path: self.file.clone(),
            include_targets: self.include_targets,
        }
    }
}
