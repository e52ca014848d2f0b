//! Month-over-month change percentages and their trend arrows.

use crate::report::Trend;

/// Rendered in place of a percentage when the previous period is zero.
pub const NOT_AVAILABLE: &str = "N/A";

/// Percentage change from `previous` to `current`, one decimal place with a
/// trailing `%`.
///
/// Returns `"N/A"` whenever `previous` is zero, even when `current` is zero
/// too; a metric rising from nothing is not reported as an infinite or 100%
/// increase.
pub fn calculate_change(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return NOT_AVAILABLE.to_string();
    }

    // Adding zero turns -0.0 into 0.0 so an unchanged negative metric is not "-0.0%".
    let change = ((current - previous) / previous) * 100.0 + 0.0;
    format!("{}%", to_fixed_1(change))
}

/// Trend arrow for an already formatted change string.
///
/// Only a leading `-` means down, so `"N/A"` maps to [`Trend::Up`].
pub fn trend_for(change: &str) -> Trend {
    if change.starts_with('-') {
        Trend::Down
    } else {
        Trend::Up
    }
}

/// One-decimal fixed formatting where exact halves round away from zero.
///
/// `format!("{:.1}")` rounds exact ties to even (`0.25` -> `0.2`). A double is
/// an exact tie at one decimal only when four times it is an odd integer.
fn to_fixed_1(value: f64) -> String {
    let quadruple = value * 4.0;
    let is_exact_tie = quadruple.fract() == 0.0 && quadruple % 2.0 != 0.0;

    if is_exact_tie {
        let rounded = ((value.abs() * 10.0) + 0.5).floor() / 10.0;
        format!("{:.1}", rounded.copysign(value))
    } else {
        format!("{:.1}", value)
    }
}
