//! The four headline tiles of the admin dashboard.

use crate::change::{calculate_change, trend_for};
use crate::report::{DashboardStat, Trend};
use crate::store::MetricsStore;
use chrono::{DateTime, Utc};
use dashstats_common::{format_count, format_currency, month_range_containing, previous_month_range, Result};
use tracing::{debug, instrument};

/// Change shown on the Total Components tile. Not computed; the catalog has no
/// component history to compare against yet.
pub const TOTAL_COMPONENTS_CHANGE: &str = "+12.5%";

fn tile(title: &str, value: String, change: String, icon: &str, color: &str) -> DashboardStat {
    let trend = trend_for(&change);
    DashboardStat {
        title: title.to_string(),
        value,
        change,
        trend,
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

/// Builds Total Revenue, Total Components, Sales and Users, in that order,
/// comparing the calendar month containing `now` against the month before.
///
/// All reads are issued together; the first failing read fails the call.
#[instrument(skip(store))]
pub async fn dashboard_stats<S>(store: &S, now: DateTime<Utc>) -> Result<Vec<DashboardStat>>
where
    S: MetricsStore + ?Sized,
{
    let current = month_range_containing(now)?;
    let previous = previous_month_range(now)?;

    let (current_sales, previous_sales, current_active, previous_active, all_time, components) = tokio::try_join!(
        store.successful_purchase_totals(Some(current)),
        store.successful_purchase_totals(Some(previous)),
        store.count_active_users(current),
        store.count_active_users(previous),
        store.successful_purchase_totals(None),
        store.count_components(),
    )?;

    debug!(
        current_revenue = current_sales.revenue_sum,
        previous_revenue = previous_sales.revenue_sum,
        current_active,
        previous_active,
        components,
        "Collected summary inputs"
    );

    let components_tile = DashboardStat {
        trend: Trend::Up,
        ..tile(
            "Total Components",
            format_count(components),
            TOTAL_COMPONENTS_CHANGE.to_string(),
            "package",
            "blue",
        )
    };

    Ok(vec![
        tile(
            "Total Revenue",
            format_currency(all_time.revenue_sum),
            calculate_change(current_sales.revenue_sum, previous_sales.revenue_sum),
            "dollar-sign",
            "emerald",
        ),
        components_tile,
        tile(
            "Sales",
            format!("+{}", format_count(all_time.transaction_count)),
            calculate_change(
                current_sales.transaction_count as f64,
                previous_sales.transaction_count as f64,
            ),
            "shopping-cart",
            "violet",
        ),
        tile(
            "Users",
            format!("+{}", format_count(current_active)),
            calculate_change(current_active as f64, previous_active as f64),
            "users",
            "orange",
        ),
    ])
}
