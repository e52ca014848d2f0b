//! Resolves configuration and runs one command, producing JSON output.

use crate::cli::{Cli, Command};
use crate::error::{CliError, CliResult};
use chrono::Utc;
use dashstats_config::{Config, ConfigLoader, ConfigValidator, DatabaseConfig};
use dashstats_metrics::seed::seed_demo_data;
use dashstats_metrics::{DashboardService, SqliteStore};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

/// Loads the configuration file named on the command line, or the default
/// lookup chain, then applies `--database-url` and re-validates.
pub fn resolve_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .map_err(CliError::Config)?;

    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
        ConfigValidator::validate(&config).map_err(CliError::Config)?;
    }

    Ok(config)
}

fn render<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn open_service(config: &Config) -> CliResult<DashboardService<SqliteStore>> {
    let store = SqliteStore::connect(&config.database).await?;
    Ok(DashboardService::new(store, config.dashboard.clone()))
}

/// Runs `command` against the configured store and returns pretty JSON.
pub async fn execute(command: &Command, config: &Config) -> CliResult<String> {
    debug!(?command, database = %config.database.url, "Executing command");

    match command {
        Command::Summary => render(&open_service(config).await?.dashboard_stats().await?),
        Command::Sales { year } => render(&open_service(config).await?.sales_by_year(*year).await?),
        Command::UserGrowth { year } => {
            render(&open_service(config).await?.user_growth_by_year(*year).await?)
        }
        Command::RecentSales { limit } => {
            render(&open_service(config).await?.recent_sales(*limit).await?)
        }
        Command::Popular { limit } => {
            render(&open_service(config).await?.popular_components(*limit).await?)
        }
        Command::InitDb => {
            let database = DatabaseConfig {
                create_schema: true,
                ..config.database.clone()
            };
            SqliteStore::connect(&database).await?;
            info!("Schema ready at {}", database.url);
            render(&json!({ "database": database.url, "initialized": true }))
        }
        Command::Seed => {
            let store = SqliteStore::connect(&config.database).await?;
            let report = seed_demo_data(&store, Utc::now()).await?;
            render(&report)
        }
    }
}
