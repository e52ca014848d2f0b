//! Components ranked by successful sales.

use crate::report::PopularComponent;
use crate::store::MetricsStore;
use chrono::{DateTime, Duration, Utc};
use dashstats_common::Result;
use tracing::{debug, instrument};

/// Category shown for components without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Top `limit` components by `SUCCESS` sale count, highest first.
///
/// Equal counts keep the store's order. Revenue is the raw sum of the
/// component's successful purchases. A component created within
/// `new_window_days` of `now` is flagged `is_new`.
#[instrument(skip(store))]
pub async fn popular_components<S>(
    store: &S,
    limit: usize,
    now: DateTime<Utc>,
    new_window_days: u32,
) -> Result<Vec<PopularComponent>>
where
    S: MetricsStore + ?Sized,
{
    let mut rows = store.component_sales().await?;
    debug!(components = rows.len(), "Loaded component sales");

    rows.sort_by(|a, b| b.sales.cmp(&a.sales));
    let new_since = now - Duration::days(i64::from(new_window_days));

    Ok(rows
        .into_iter()
        .take(limit)
        .map(|row| PopularComponent {
            id: row.id,
            name: row.name,
            category: row.category.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            sales: row.sales,
            revenue: row.revenue,
            is_featured: row.is_featured,
            is_new: row.created_at >= new_since,
            is_ai: row.is_ai,
        })
        .collect())
}
