//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dashstats", version)]
#[command(about = "Admin dashboard reports over purchases, users and components", long_about = None)]
pub struct Cli {
    /// YAML configuration file (defaults to DASHSTATS_CONFIG_PATH or ./dashstats.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL, overriding the configuration
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Headline tiles for the current month
    Summary,

    /// Monthly revenue and transactions for a year
    Sales {
        #[arg(long)]
        year: i32,
    },

    /// Monthly cumulative users and late-month signups for a year
    UserGrowth {
        #[arg(long)]
        year: i32,
    },

    /// Newest component purchases
    RecentSales {
        /// Rows to return (defaults to dashboard.recent_sales_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Components ranked by successful sales
    Popular {
        /// Rows to return (defaults to dashboard.popular_components_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Create the database schema
    InitDb,

    /// Insert a small demo data set dated relative to now
    Seed,
}
