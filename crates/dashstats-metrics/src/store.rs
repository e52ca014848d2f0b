//! The read-only query surface the dashboard operations run against.

use crate::models::{ComponentSalesRow, DatedAmount, PeriodAggregate, RecentSaleRow, UserSignup};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashstats_common::{DateRange, Result};
use std::sync::Arc;

/// Queries over purchases, users and components.
///
/// Implementations must not write. Ranges include `start` and exclude `end`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Sum and count of `SUCCESS` purchases dated within `range`, or of all
    /// of them when `range` is `None`.
    async fn successful_purchase_totals(&self, range: Option<DateRange>) -> Result<PeriodAggregate>;

    /// Users whose last login falls within `range`.
    async fn count_active_users(&self, range: DateRange) -> Result<u64>;

    /// Every component in the catalog.
    async fn count_components(&self) -> Result<u64>;

    /// Amount and date of every `SUCCESS` purchase dated within `range`.
    async fn successful_purchases_between(&self, range: DateRange) -> Result<Vec<DatedAmount>>;

    /// Users registered within `range`, oldest first.
    async fn users_created_between(&self, range: DateRange) -> Result<Vec<UserSignup>>;

    /// Users registered before `end`, regardless of year.
    async fn count_users_created_before(&self, end: DateTime<Utc>) -> Result<u64>;

    /// Newest purchases that reference a component and have a positive
    /// amount, any status, at most `limit` rows, newest first.
    async fn recent_component_purchases(&self, limit: usize) -> Result<Vec<RecentSaleRow>>;

    /// Every component with the count and revenue of its `SUCCESS` purchases
    /// with positive amount. Components without sales report zero.
    async fn component_sales(&self) -> Result<Vec<ComponentSalesRow>>;
}

#[async_trait]
impl<S: MetricsStore + ?Sized> MetricsStore for Arc<S> {
    async fn successful_purchase_totals(&self, range: Option<DateRange>) -> Result<PeriodAggregate> {
        (**self).successful_purchase_totals(range).await
    }

    async fn count_active_users(&self, range: DateRange) -> Result<u64> {
        (**self).count_active_users(range).await
    }

    async fn count_components(&self) -> Result<u64> {
        (**self).count_components().await
    }

    async fn successful_purchases_between(&self, range: DateRange) -> Result<Vec<DatedAmount>> {
        (**self).successful_purchases_between(range).await
    }

    async fn users_created_between(&self, range: DateRange) -> Result<Vec<UserSignup>> {
        (**self).users_created_between(range).await
    }

    async fn count_users_created_before(&self, end: DateTime<Utc>) -> Result<u64> {
        (**self).count_users_created_before(end).await
    }

    async fn recent_component_purchases(&self, limit: usize) -> Result<Vec<RecentSaleRow>> {
        (**self).recent_component_purchases(limit).await
    }

    async fn component_sales(&self) -> Result<Vec<ComponentSalesRow>> {
        (**self).component_sales().await
    }
}
