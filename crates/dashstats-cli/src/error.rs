//! Application-wide error types using thiserror.

use dashstats_common::DashError;

/// Errors surfaced by the command line front end.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[source] DashError),

    /// A report or store operation failed.
    #[error("Report failed: {0}")]
    Report(#[from] DashError),

    /// Output could not be rendered.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for the command line front end.
pub type CliResult<T> = Result<T, CliError>;
