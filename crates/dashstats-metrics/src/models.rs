//! Store-side records: the entities the dashboard reads and the narrow row
//! shapes the [`MetricsStore`](crate::MetricsStore) queries return.

use chrono::{DateTime, Utc};
use dashstats_common::{CategoryId, ComponentId, PurchaseId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of a purchase.
///
/// Only [`PurchaseStatus::Success`] counts toward revenue and sales. Statuses
/// the dashboard does not know about are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PurchaseStatus {
    /// Checkout started, payment not confirmed.
    Pending,
    /// Payment captured.
    Success,
    /// Payment declined or errored.
    Failed,
    /// Any other stored value.
    Other(String),
}

impl PurchaseStatus {
    /// The value stored in the `status` column.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Other(raw) => raw,
        }
    }

    /// Parses a stored status; unknown values become `Other`.
    pub fn from_db(raw: &str) -> Self {
        match raw {
            "PENDING" => Self::Pending,
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the purchase counts toward revenue and sales totals.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PurchaseStatus {
    fn from(raw: String) -> Self {
        Self::from_db(&raw)
    }
}

impl From<PurchaseStatus> for String {
    fn from(status: PurchaseStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A purchase of a catalog component (or of a bundle when `component_id` is unset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: PurchaseId,
    /// Amount in currency units.
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: PurchaseStatus,
    pub user_id: UserId,
    pub component_id: Option<ComponentId>,
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    /// Most recent sign-in; decides "active this period".
    pub last_login: Option<DateTime<Utc>>,
    /// Registration time; decides "new this period".
    pub created_at: DateTime<Utc>,
}

/// A sellable catalog component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub is_featured: bool,
    pub is_ai: bool,
    pub created_at: DateTime<Utc>,
}

/// A component category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Revenue and transaction count over a half-open interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAggregate {
    pub revenue_sum: f64,
    pub transaction_count: u64,
}

/// Amount and timestamp of one successful purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedAmount {
    pub amount: f64,
    pub date: DateTime<Utc>,
}

/// Registration time of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSignup {
    pub id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A purchase joined with its customer and component names.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentSaleRow {
    pub id: PurchaseId,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: PurchaseStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_image: Option<String>,
    pub component_name: Option<String>,
}

/// One component with its successful sale count and revenue.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSalesRow {
    pub id: ComponentId,
    pub name: String,
    pub category: Option<String>,
    pub is_featured: bool,
    pub is_ai: bool,
    pub created_at: DateTime<Utc>,
    pub sales: u64,
    pub revenue: f64,
}
