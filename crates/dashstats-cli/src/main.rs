//! Main entry point for the dashstats command line.

use anyhow::Context;
use clap::Parser;
use dashstats_cli::{execute, resolve_config, Cli};
use dashstats_common::logging::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli).context("Failed to load configuration")?;
    init_logging(config.logging.to_setup()).context("Failed to initialize logging")?;

    info!("Starting dashstats {}", env!("CARGO_PKG_VERSION"));

    match execute(&cli.command, &config).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e).context("dashstats command failed")
        }
    }
}
