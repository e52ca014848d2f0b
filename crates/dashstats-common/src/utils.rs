//! Calendar, rounding, and display helpers shared by the aggregation crates.
//!
//! All calendar math is done in UTC. Month indices are zero-based
//! (`0` = January) to match the 12-slot series the dashboard renders.

use crate::{DashError, Result};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Three-letter month labels in calendar order.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A half-open time interval `[start, end)`.
///
/// Stored timestamps keep sub-millisecond digits, so a month ends where the
/// next one starts rather than at a last representable instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant included in the range.
    pub start: DateTime<Utc>,
    /// First instant after the range.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range from an inclusive start and an exclusive end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `ts` lies within the range: at or after `start`, before `end`.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Label for a zero-based month index, e.g. `0` -> `"Jan"`.
///
/// Indices past December wrap around.
pub fn month_label(month0: usize) -> &'static str {
    MONTH_ABBREVIATIONS[month0 % 12]
}

fn month_start(year: i32, month0: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month0 + 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| {
            DashError::validation_field(
                format!("{year}-{:02} is not a representable calendar month", month0 + 1),
                "year",
            )
        })
}

/// The calendar month `month0` of `year`, from its first instant up to the
/// first instant of the following month.
pub fn month_range(year: i32, month0: u32) -> Result<DateRange> {
    if month0 > 11 {
        return Err(DashError::validation_field(
            format!("month index {month0} is out of range"),
            "month",
        ));
    }

    let start = month_start(year, month0)?;
    let next = if month0 == 11 {
        let next_year = year
            .checked_add(1)
            .ok_or_else(|| DashError::validation_field("year overflows", "year"))?;
        month_start(next_year, 0)?
    } else {
        month_start(year, month0 + 1)?
    };

    Ok(DateRange::new(start, next))
}

/// January 1st 00:00 of `year` up to January 1st 00:00 of the next year.
pub fn year_range(year: i32) -> Result<DateRange> {
    let january = month_range(year, 0)?;
    let december = month_range(year, 11)?;
    Ok(DateRange::new(january.start, december.end))
}

/// The calendar month containing `ts`.
pub fn month_range_containing(ts: DateTime<Utc>) -> Result<DateRange> {
    month_range(ts.year(), ts.month0())
}

/// The calendar month immediately preceding the one containing `ts`.
pub fn previous_month_range(ts: DateTime<Utc>) -> Result<DateRange> {
    if ts.month0() == 0 {
        let year = ts
            .year()
            .checked_sub(1)
            .ok_or_else(|| DashError::validation_field("year underflows", "year"))?;
        month_range(year, 11)
    } else {
        month_range(ts.year(), ts.month0() - 1)
    }
}

/// The trailing `days` calendar days of a month: from 00:00 of
/// `last_day - (days - 1)` up to the end of the month.
///
/// A window longer than the month is clamped to the whole month.
pub fn trailing_days_of_month(year: i32, month0: u32, days: u32) -> Result<DateRange> {
    let month = month_range(year, month0)?;
    let start = (month.end - Duration::days(i64::from(days))).max(month.start);
    Ok(DateRange::new(start, month.end))
}

/// Rounds to two decimal places using `round(value * 100) / 100`.
///
/// Plain binary floating point; halves round up, toward positive infinity,
/// so `-0.125` becomes `-0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount as dollars with thousands separators, e.g. `$45,231.89`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a count with thousands separators, e.g. `12,234`.
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}
