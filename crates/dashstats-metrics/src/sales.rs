//! Monthly revenue and transaction series for one calendar year.

use crate::report::SalesDataPoint;
use crate::store::MetricsStore;
use chrono::Datelike;
use dashstats_common::{month_label, round2, year_range, Result};
use tracing::{debug, instrument};

/// Twelve points, Jan through Dec, of `SUCCESS` revenue and transaction
/// counts within `year`. Months without sales report zero.
#[instrument(skip(store))]
pub async fn sales_by_year<S>(store: &S, year: i32) -> Result<Vec<SalesDataPoint>>
where
    S: MetricsStore + ?Sized,
{
    let range = year_range(year)?;
    let purchases = store.successful_purchases_between(range).await?;

    let mut revenue = [0.0_f64; 12];
    let mut transactions = [0_u64; 12];
    for purchase in &purchases {
        let month = purchase.date.month0() as usize;
        revenue[month] += purchase.amount;
        transactions[month] += 1;
    }

    debug!(year, purchases = purchases.len(), "Bucketed purchases by month");

    Ok((0..12)
        .map(|month| SalesDataPoint {
            name: month_label(month).to_string(),
            revenue: round2(revenue[month]),
            transactions: transactions[month],
        })
        .collect())
}
