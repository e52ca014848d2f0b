//! # Dashstats Metrics
//!
//! Month-over-month dashboard reports over purchases, users and catalog
//! components.
//!
//! Every report reads through the [`MetricsStore`] trait; [`SqliteStore`] is
//! the bundled implementation and [`DashboardService`] binds a store to the
//! configured list defaults.
//!
//! ```no_run
//! use dashstats_config::DashboardConfig;
//! use dashstats_metrics::{DashboardService, SqliteStore};
//!
//! # async fn run() -> dashstats_common::Result<()> {
//! let store = SqliteStore::in_memory().await?;
//! let service = DashboardService::new(store, DashboardConfig::default());
//! let tiles = service.dashboard_stats().await?;
//! let sales = service.sales_by_year(2024).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod change;
pub mod models;
pub mod popular;
pub mod recent_sales;
pub mod report;
pub mod sales;
pub mod seed;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod summary;
pub mod user_growth;

pub use change::{calculate_change, trend_for};
pub use models::*;
pub use report::*;
pub use service::DashboardService;
pub use sqlite::SqliteStore;
pub use store::MetricsStore;

#[cfg(test)]
pub use store::MockMetricsStore;
