//! Tests for malformed requests and data anomalies
//!
//! These tests verify:
//! - Request validation order and error kinds
//! - Zero-price reinvestment days are skipped, not fatal
//! - Invalid dividend amounts and duplicate price rows are reported
//! - The next-trading-day policy for weekend pay dates

use jiff::civil::date;

use super::{assert_close, three_day_prices};
use crate::config::RequestBuilder;
use crate::error::SimError;
use crate::model::{
    DividendEvent, DividendOutcome, DividendPolicy, PositionSize, PricePoint, SimulationRequest,
    UnmatchedDividendPolicy, WarningKind,
};
use crate::simulation::simulate;

fn raw_request(start: (i16, i8, i8), end: (i16, i8, i8)) -> SimulationRequest {
    SimulationRequest::new(
        "X",
        date(start.0, start.1, start.2),
        date(end.0, end.1, end.2),
        PositionSize::Shares(10.0),
        DividendPolicy::Cash,
    )
}

#[test]
fn test_invalid_range_takes_precedence() {
    // Nothing would match this ticker either, but the range is checked first
    let mut request = raw_request((2024, 1, 3), (2024, 1, 1));
    request.ticker = "MISSING".to_string();

    let err = simulate(&three_day_prices(), &[], &request).unwrap_err();
    assert_eq!(
        err,
        SimError::InvalidRange {
            start: date(2024, 1, 3),
            end: date(2024, 1, 1),
        }
    );
}

#[test]
fn test_single_day_range_is_valid() {
    let request = raw_request((2024, 1, 2), (2024, 1, 2));
    let result = simulate(&three_day_prices(), &[], &request).unwrap();
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.summary().unwrap().annualized_yield_pct, None);
}

#[test]
fn test_non_positive_position_is_rejected() {
    for position in [
        PositionSize::Shares(0.0),
        PositionSize::Cash(-5.0),
        PositionSize::Shares(f64::NAN),
    ] {
        let mut request = raw_request((2024, 1, 1), (2024, 1, 3));
        request.position = position;
        let err = simulate(&three_day_prices(), &[], &request).unwrap_err();
        assert!(matches!(err, SimError::InvalidPosition { .. }), "{err:?}");
    }
}

#[test]
fn test_cash_sizing_needs_positive_entry_price() {
    let mut prices = three_day_prices();
    prices[0].close = 0.0;
    let mut request = raw_request((2024, 1, 1), (2024, 1, 3));
    request.position = PositionSize::Cash(1_000.0);

    let err = simulate(&prices, &[], &request).unwrap_err();
    assert_eq!(
        err,
        SimError::InvalidEntryPrice {
            date: date(2024, 1, 1),
            price: 0.0,
        }
    );
}

#[test]
fn test_zero_price_reinvestment_is_skipped() {
    let mut prices = three_day_prices();
    prices[1].close = 0.0;
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 2), 1.0)];
    let mut request = raw_request((2024, 1, 1), (2024, 1, 3));
    request.policy = DividendPolicy::Reinvest;

    let result = simulate(&prices, &dividends, &request).unwrap();

    assert_close(result.last().unwrap().shares_held, 10.0, "shares");
    assert_eq!(result.ledger[0].outcome, DividendOutcome::Skipped);
    assert_eq!(
        result.warnings[0].kind,
        WarningKind::AnomalousReinvestment { price: 0.0 }
    );
    assert_eq!(result.records[1].market_value, 0.0);
}

#[test]
fn test_zero_price_cash_payout_still_paid() {
    let mut prices = three_day_prices();
    prices[1].close = 0.0;
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 2), 1.0)];
    let request = raw_request((2024, 1, 1), (2024, 1, 3));

    let result = simulate(&prices, &dividends, &request).unwrap();
    assert_close(result.records[1].cash_distributed, 10.0, "cash");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_invalid_dividend_amount_is_skipped() {
    let dividends = vec![
        DividendEvent::new("X", date(2024, 1, 2), -1.0),
        DividendEvent::new("X", date(2024, 1, 3), f64::INFINITY),
    ];
    let request = raw_request((2024, 1, 1), (2024, 1, 3));

    let result = simulate(&three_day_prices(), &dividends, &request).unwrap();
    assert_close(result.last().unwrap().cash_distributed, 0.0, "cash");
    assert_eq!(result.warnings.len(), 2);
    assert!(
        result
            .ledger
            .iter()
            .all(|e| e.outcome == DividendOutcome::Skipped)
    );
}

#[test]
fn test_duplicate_price_rows_keep_first() {
    let mut prices = three_day_prices();
    prices.push(PricePoint::new("X", date(2024, 1, 2), 99.0));
    let request = raw_request((2024, 1, 1), (2024, 1, 3));

    let result = simulate(&prices, &[], &request).unwrap();
    assert_eq!(result.records.len(), 3);
    assert_close(result.records[1].close, 10.0, "kept close");
    assert_eq!(result.warnings[0].kind, WarningKind::DuplicatePriceDate);
}

#[test]
fn test_next_trading_day_policy_applies_weekend_dividend() {
    // 2024-01-05 is a Friday, 2024-01-08 a Monday
    let prices = vec![
        PricePoint::new("X", date(2024, 1, 5), 10.0),
        PricePoint::new("X", date(2024, 1, 8), 10.0),
    ];
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 6), 0.5)];

    let dropped = RequestBuilder::new("X")
        .start(2024, 1, 5)
        .end(2024, 1, 8)
        .shares(100.0)
        .build()
        .unwrap();
    let snapped = RequestBuilder::new("X")
        .start(2024, 1, 5)
        .end(2024, 1, 8)
        .shares(100.0)
        .snap_to_next_trading_day()
        .build()
        .unwrap();
    assert_eq!(snapped.unmatched, UnmatchedDividendPolicy::NextTradingDay);

    let result = simulate(&prices, &dividends, &dropped).unwrap();
    assert_close(result.last().unwrap().cash_distributed, 0.0, "dropped cash");

    let result = simulate(&prices, &dividends, &snapped).unwrap();
    assert_close(result.records[0].cash_distributed, 0.0, "friday cash");
    assert_close(result.records[1].cash_distributed, 50.0, "monday cash");
    assert_eq!(result.ledger[0].applied_on, Some(date(2024, 1, 8)));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_next_trading_day_policy_drops_after_last_row() {
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 5), 1.0)];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 10)
        .shares(10.0)
        .snap_to_next_trading_day()
        .build()
        .unwrap();

    let result = simulate(&three_day_prices(), &dividends, &request).unwrap();
    assert_eq!(result.ledger[0].outcome, DividendOutcome::Dropped);
    assert_eq!(result.warnings[0].kind, WarningKind::UnmatchedPayDate);
}
