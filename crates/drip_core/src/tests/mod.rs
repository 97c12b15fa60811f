//! Integration tests for the total-return simulation engine
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked cash and DRIP examples
//! - `properties` - Invariants over longer synthetic histories
//! - `anomalies` - Dropped, skipped and malformed inputs
//! - `comparison` - Multi-ticker comparison

mod anomalies;
mod scenarios;

use jiff::civil::{Date, date};

use crate::date_math::weekdays_from;
use crate::model::{DividendEvent, PricePoint};

pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "{what}: expected {expected}, got {actual}"
    );
}

/// Three trading days for ticker X: $10, $10, $12
pub(crate) fn three_day_prices() -> Vec<PricePoint> {
    vec![
        PricePoint::new("X", date(2024, 1, 1), 10.0),
        PricePoint::new("X", date(2024, 1, 2), 10.0),
        PricePoint::new("X", date(2024, 1, 3), 12.0),
    ]
}

/// Weekday closes oscillating around $20 with a slow upward drift
pub(crate) fn synthetic_prices(ticker: &str, start: Date, days: usize) -> Vec<PricePoint> {
    weekdays_from(start, days)
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            let wobble = ((i % 7) as f64 - 3.0) * 0.25;
            PricePoint::new(ticker, d, 20.0 + i as f64 * 0.01 + wobble)
        })
        .collect()
}

/// A dividend on the 15th of every month (some fall on weekends)
pub(crate) fn monthly_dividends(ticker: &str, year: i16, amount: f64) -> Vec<DividendEvent> {
    (1..=12)
        .map(|m| DividendEvent::new(ticker, date(year, m, 15), amount))
        .collect()
}
