//! Day-count helpers on top of `jiff::civil::Date`.

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};

/// Average days per year used to annualise yields
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of calendar days from `d1` to `d2`; negative when `d2 < d1`.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    (d2 - d1).get_days()
}

/// Monday to Friday dates starting at `start`, `count` of them.
///
/// Market holidays are not modelled; this produces synthetic trading
/// calendars for fixtures and benchmarks.
pub fn weekdays_from(start: Date, count: usize) -> Vec<Date> {
    start
        .series(1.day())
        .filter(|d| !matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday))
        .take(count)
        .collect()
}
