//! Cumulative user counts and late-month signups for one calendar year.

use crate::report::UserGrowthPoint;
use crate::store::MetricsStore;
use dashstats_common::{month_label, month_range, trailing_days_of_month, year_range, Result};
use futures::future::try_join_all;
use tracing::{debug, instrument};

/// Length of the late-month window counted as `new_users`.
pub const NEW_USER_WINDOW_DAYS: u32 = 7;

/// Twelve points, Jan through Dec.
///
/// `users` counts every user registered before the month ends, across all
/// years. `new_users` counts only users registered during the last
/// [`NEW_USER_WINDOW_DAYS`] calendar days of that month.
#[instrument(skip(store))]
pub async fn user_growth_by_year<S>(store: &S, year: i32) -> Result<Vec<UserGrowthPoint>>
where
    S: MetricsStore + ?Sized,
{
    let months = (0..12u32)
        .map(|month0| month_range(year, month0))
        .collect::<Result<Vec<_>>>()?;
    let windows = (0..12u32)
        .map(|month0| trailing_days_of_month(year, month0, NEW_USER_WINDOW_DAYS))
        .collect::<Result<Vec<_>>>()?;

    let signups = store.users_created_between(year_range(year)?).await?;
    let cumulative = try_join_all(
        months
            .iter()
            .map(|month| store.count_users_created_before(month.end)),
    )
    .await?;

    debug!(year, signups = signups.len(), "Loaded signups for the year");

    Ok(windows
        .iter()
        .zip(cumulative)
        .enumerate()
        .map(|(month, (window, users))| UserGrowthPoint {
            name: month_label(month).to_string(),
            users,
            new_users: signups
                .iter()
                .filter(|signup| window.contains(signup.created_at))
                .count() as u64,
        })
        .collect())
}
