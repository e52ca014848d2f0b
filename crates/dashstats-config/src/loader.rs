//! Configuration loading utilities

use crate::schema::Config;
use dashstats_common::{DashError, Result as DashResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "DASHSTATS_CONFIG_PATH";

/// File names looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["dashstats.yaml", "dashstats.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::config_with_source("Failed to load configuration", err)
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Reading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::load_from_str(&content, |key| env::var(key).ok())
    }

    /// Parse YAML, apply overrides from `lookup`, and validate.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn load_from_str<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> DashResult<Config> {
        let explicit = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let discovered = DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists());

        let config = match explicit.or(discovered) {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::load_config(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::load_from_str("", |key| env::var(key).ok())?
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database configuration overrides
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }

        if let Some(raw) = lookup("DASHSTATS_DB_MAX_CONNECTIONS") {
            config.database.max_connections = parse_var("DASHSTATS_DB_MAX_CONNECTIONS", &raw)?;
        }

        // Dashboard configuration overrides
        if let Some(raw) = lookup("DASHSTATS_RECENT_SALES_LIMIT") {
            config.dashboard.recent_sales_limit = parse_var("DASHSTATS_RECENT_SALES_LIMIT", &raw)?;
        }

        if let Some(raw) = lookup("DASHSTATS_POPULAR_LIMIT") {
            config.dashboard.popular_components_limit = parse_var("DASHSTATS_POPULAR_LIMIT", &raw)?;
        }

        // Logging configuration overrides
        if let Some(level) = lookup("DASHSTATS_LOG_LEVEL") {
            config.logging.level = level.trim().to_lowercase();
        }

        if let Some(raw) = lookup("DASHSTATS_LOG_JSON") {
            config.logging.json = parse_var("DASHSTATS_LOG_JSON", &raw)?;
        }

        if let Some(file) = lookup("DASHSTATS_LOG_FILE") {
            config.logging.file = Some(file).filter(|f| !f.is_empty());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = ConfigLoader::load_from_str("", vars(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "dashboard:\n  recent_sales_limit: 10\n";
        let config = ConfigLoader::load_from_str(yaml, vars(&[])).unwrap();
        assert_eq!(config.dashboard.recent_sales_limit, 10);
        assert_eq!(config.dashboard.popular_components_limit, 5);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let yaml = "database:\n  url: \"sqlite://from-file.db\"\n";
        let config = ConfigLoader::load_from_str(
            yaml,
            vars(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("DASHSTATS_POPULAR_LIMIT", "8"),
                ("DASHSTATS_LOG_LEVEL", "DEBUG"),
                ("DASHSTATS_LOG_JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.dashboard.popular_components_limit, 8);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_unparseable_env_value_is_an_error() {
        let err = ConfigLoader::load_from_str("", vars(&[("DASHSTATS_RECENT_SALES_LIMIT", "five")]))
            .unwrap_err();
        match err {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "DASHSTATS_RECENT_SALES_LIMIT"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let yaml = "dashboard:\n  popular_components_limit: 0\n";
        let err = ConfigLoader::load_from_str(yaml, vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = ConfigLoader::load_from_str("database: [unclosed", vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConfigLoader::load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
