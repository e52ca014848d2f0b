//! Field validators referenced from the schema's `#[validate]` attributes.

use crate::schema::Config;
use dashstats_common::{DashError, Result};
use validator::{Validate, ValidationError};

/// Accepts `sqlite:` URLs, including `sqlite::memory:`.
pub fn validate_database_url(url: &str) -> std::result::Result<(), ValidationError> {
    if url.starts_with("sqlite:") {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_database_scheme"))
    }
}

/// Accepts the five tracing level names.
pub fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, flattening field errors into one message.
    pub fn validate(config: &Config) -> Result<()> {
        config
            .validate()
            .map_err(|errors| DashError::config_with_source("Invalid configuration", errors))
    }
}
