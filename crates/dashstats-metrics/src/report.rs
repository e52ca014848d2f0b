//! Serializable records returned to dashboard callers.
//!
//! Field names serialize in camelCase, the shape the dashboard front end reads.

use crate::models::PurchaseStatus;
use chrono::{DateTime, Utc};
use dashstats_common::{ComponentId, PurchaseId};
use serde::{Deserialize, Serialize};

/// Direction arrow shown next to a change percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One headline tile of the dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStat {
    pub title: String,
    /// Display value, already formatted (currency or count).
    pub value: String,
    /// Month-over-month change, e.g. `"20.0%"`, `"-3.1%"` or `"N/A"`.
    pub change: String,
    pub trend: Trend,
    /// Icon identifier understood by the front end.
    pub icon: String,
    /// Style token for the tile accent.
    pub color: String,
}

/// Revenue and transactions for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDataPoint {
    /// Three-letter month label.
    pub name: String,
    /// Revenue rounded to two decimals.
    pub revenue: f64,
    pub transactions: u64,
}

/// User totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrowthPoint {
    /// Three-letter month label.
    pub name: String,
    /// Every user registered up to the end of the month, all years included.
    pub users: u64,
    /// Users registered in the last seven days of the month.
    pub new_users: u64,
}

/// Display data for the buyer of a recent sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

/// One row of the recent sales list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: PurchaseId,
    pub customer: Customer,
    pub amount: f64,
    /// Component name, `None` when the referenced component no longer resolves.
    pub component: Option<String>,
    pub date: DateTime<Utc>,
    pub status: PurchaseStatus,
}

/// One row of the popular components ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularComponent {
    pub id: ComponentId,
    pub name: String,
    pub category: String,
    pub sales: u64,
    pub revenue: f64,
    pub is_featured: bool,
    pub is_new: bool,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
}
