//! Newest component purchases with customer details.

use crate::report::{Customer, RecentSale};
use crate::store::MetricsStore;
use dashstats_common::Result;
use tracing::{debug, instrument};

/// At most `limit` purchases that reference a component and have a positive
/// amount, newest first. Purchases of any status are listed.
#[instrument(skip(store))]
pub async fn recent_sales<S>(store: &S, limit: usize) -> Result<Vec<RecentSale>>
where
    S: MetricsStore + ?Sized,
{
    if limit == 0 {
        return Ok(Vec::new());
    }

    let rows = store.recent_component_purchases(limit).await?;
    debug!(rows = rows.len(), limit, "Fetched recent sales");

    Ok(rows
        .into_iter()
        .take(limit)
        .map(|row| RecentSale {
            id: row.id,
            customer: Customer {
                name: row.customer_name,
                email: row.customer_email,
                image: row.customer_image,
            },
            amount: row.amount,
            component: row.component_name,
            date: row.date,
            status: row.status,
        })
        .collect())
}
