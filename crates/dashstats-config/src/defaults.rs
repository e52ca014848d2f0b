//! Default values for every configuration section.

use crate::schema::*;

/// Default connection string for a local database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://dashstats.db";

/// Rows returned by list operations when the caller passes no limit.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Days after creation during which a component counts as new.
pub const DEFAULT_NEW_COMPONENT_WINDOW_DAYS: u32 = 30;

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            connection_timeout_seconds: 30,
            create_schema: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_sales_limit: DEFAULT_LIST_LIMIT,
            popular_components_limit: DEFAULT_LIST_LIMIT,
            new_component_window_days: DEFAULT_NEW_COMPONENT_WINDOW_DAYS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
            include_targets: true,
        }
    }
}
