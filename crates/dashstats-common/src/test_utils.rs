//! Test utilities and shared test helpers for dashstats.
//!
//! Available to other crates through the `testing` feature.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a UTC timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Property-based testing strategies using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Purchase amounts in whole cents, as the catalog prices them.
    pub fn amount_strategy() -> impl Strategy<Value = f64> {
        (1u32..=500_000u32).prop_map(|cents| f64::from(cents) / 100.0)
    }

    /// Calendar years a dashboard would plausibly be asked about.
    pub fn year_strategy() -> impl Strategy<Value = i32> {
        1990i32..=2100i32
    }
}
