//! Worked examples of cash payouts and reinvestment
//!
//! These tests verify:
//! - Cash payouts accumulate next to a constant share count
//! - Reinvested payouts buy shares at the pay-date close
//! - Dividends on non-trading days are dropped without error
//! - Dollar amounts are sized at the first trading day's close
//! - An empty range is an error with no partial result

use jiff::civil::date;

use super::{assert_close, three_day_prices};
use crate::config::RequestBuilder;
use crate::error::SimError;
use crate::model::{DividendEvent, DividendOutcome, DividendPolicy, WarningKind};
use crate::simulation::simulate;
use crate::summary::summarize;

#[test]
fn test_cash_payout_scenario() {
    let prices = three_day_prices();
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 2), 1.0)];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();
    assert_eq!(result.records.len(), 3);

    let day1 = &result.records[0];
    assert_close(day1.cash_distributed, 0.0, "day 1 cash");
    assert_close(day1.true_value, 100.0, "day 1 true value");

    let day2 = &result.records[1];
    assert_eq!(day2.date, date(2024, 1, 2));
    assert_close(day2.shares_held, 10.0, "day 2 shares");
    assert_close(day2.cash_distributed, 10.0, "day 2 cash");
    assert_close(day2.market_value, 100.0, "day 2 market value");
    assert_close(day2.true_value, 110.0, "day 2 true value");

    let day3 = &result.records[2];
    assert_close(day3.shares_held, 10.0, "day 3 shares");
    assert_close(day3.market_value, 120.0, "day 3 market value");
    assert_close(day3.true_value, 130.0, "day 3 true value");

    assert_eq!(result.ledger.len(), 1);
    assert_eq!(result.ledger[0].outcome, DividendOutcome::Paid { cash: 10.0 });
    assert!(result.warnings.is_empty());
}

#[test]
fn test_reinvest_scenario() {
    let prices = three_day_prices();
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 2), 1.0)];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .reinvest()
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();

    let day2 = &result.records[1];
    assert_close(day2.shares_held, 11.0, "day 2 shares");
    assert_close(day2.cash_distributed, 0.0, "day 2 cash");
    assert_close(day2.market_value, 110.0, "day 2 market value");
    assert_close(day2.true_value, 110.0, "day 2 true value");

    let day3 = &result.records[2];
    assert_close(day3.market_value, 132.0, "day 3 market value");
    assert_close(day3.true_value, 132.0, "day 3 true value");

    match result.ledger[0].outcome {
        DividendOutcome::Reinvested {
            cash,
            shares_bought,
            price,
        } => {
            assert_close(cash, 10.0, "payout");
            assert_close(shares_bought, 1.0, "shares bought");
            assert_close(price, 10.0, "reinvestment price");
        }
        ref other => panic!("expected reinvestment, got {other:?}"),
    }
}

#[test]
fn test_first_day_dividend_capital_differs_by_policy() {
    let prices = three_day_prices();
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 1), 1.0)];
    let builder = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0);

    let cash = simulate(&prices, &dividends, &builder.clone().build().unwrap()).unwrap();
    let cash = summarize(&cash.records, DividendPolicy::Cash).unwrap();
    assert_close(cash.initial_capital, 100.0, "cash initial capital");
    assert_close(cash.total_return_pct, 30.0, "cash return");

    // The reinvested share is already held in the first record
    let drip = simulate(&prices, &dividends, &builder.reinvest().build().unwrap()).unwrap();
    let drip = summarize(&drip.records, DividendPolicy::Reinvest).unwrap();
    assert_close(drip.initial_shares, 11.0, "drip initial shares");
    assert_close(drip.initial_capital, 110.0, "drip initial capital");
    assert_close(drip.total_return_pct, 20.0, "drip return");
}

#[test]
fn test_dividend_on_non_trading_day_is_dropped() {
    let prices = three_day_prices();
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 4), 1.0)];

    for reinvest in [false, true] {
        let mut builder = RequestBuilder::new("X")
            .start(2024, 1, 1)
            .end(2024, 1, 5)
            .shares(10.0);
        if reinvest {
            builder = builder.reinvest();
        }
        let request = builder.build().unwrap();

        let result = simulate(&prices, &dividends, &request).unwrap();
        let last = result.last().unwrap();
        assert_close(last.shares_held, 10.0, "shares");
        assert_close(last.cash_distributed, 0.0, "cash");
        assert_close(last.true_value, 120.0, "true value");

        assert_eq!(result.ledger.len(), 1);
        assert_eq!(result.ledger[0].outcome, DividendOutcome::Dropped);
        assert_eq!(result.ledger[0].applied_on, None);
        assert_eq!(result.dropped_dividends().count(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnmatchedPayDate);
    }
}

#[test]
fn test_dividend_outside_range_is_ignored() {
    let prices = three_day_prices();
    let dividends = vec![DividendEvent::new("X", date(2024, 1, 4), 1.0)];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();
    assert!(result.ledger.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_dollar_amount_entry() {
    let prices = three_day_prices();
    // Start on a date with no price row; entry is the first trading day after it
    let request = RequestBuilder::new("X")
        .start(2023, 12, 30)
        .end(2024, 1, 3)
        .cash(1_000.0)
        .build()
        .unwrap();

    let result = simulate(&prices, &[], &request).unwrap();
    assert_eq!(result.initial_shares, 100.0);
    assert_eq!(result.entry_price, 10.0);
    assert_eq!(result.records[0].date, date(2024, 1, 1));
    assert_close(result.records[0].market_value, 1_000.0, "entry value");
}

#[test]
fn test_dollar_amount_is_not_rounded() {
    let prices = three_day_prices();
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .cash(1_005.0)
        .build()
        .unwrap();

    let result = simulate(&prices, &[], &request).unwrap();
    assert_close(result.initial_shares, 100.5, "initial shares");
}

#[test]
fn test_empty_range_returns_no_price_data() {
    let prices = three_day_prices();
    let request = RequestBuilder::new("X")
        .start(2024, 2, 1)
        .end(2024, 2, 28)
        .shares(10.0)
        .build()
        .unwrap();

    let err = simulate(&prices, &[], &request).unwrap_err();
    assert_eq!(
        err,
        SimError::NoPriceData {
            ticker: "X".to_string(),
            start: date(2024, 2, 1),
            end: date(2024, 2, 28),
        }
    );
}

#[test]
fn test_unknown_ticker_returns_no_price_data() {
    let request = RequestBuilder::new("NOPE")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .build()
        .unwrap();

    let err = simulate(&three_day_prices(), &[], &request).unwrap_err();
    assert!(matches!(err, SimError::NoPriceData { .. }));
}

#[test]
fn test_reinvested_shares_compound_into_later_payouts() {
    let prices = three_day_prices();
    let dividends = vec![
        DividendEvent::new("X", date(2024, 1, 2), 1.0),
        DividendEvent::new("X", date(2024, 1, 3), 1.2),
    ];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .reinvest()
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();

    // Second payout uses 11 shares: 11 * 1.2 = 13.2 at $12 buys 1.1 shares
    assert_close(result.records[2].shares_held, 12.1, "final shares");
    assert_close(result.ledger[1].payout(), 13.2, "second payout");
    assert_close(result.total_dividend_income(), 23.2, "total income");
}

#[test]
fn test_same_day_dividends_apply_in_sequence() {
    let prices = three_day_prices();
    let dividends = vec![
        DividendEvent::new("X", date(2024, 1, 2), 1.0),
        DividendEvent::new("X", date(2024, 1, 2), 1.0),
    ];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .reinvest()
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();

    // 10 -> 11 shares, then 11 * $1 / $10 = 1.1 more
    assert_close(result.records[1].shares_held, 12.1, "shares after two payouts");
    assert_eq!(result.applied_dividends().count(), 2);
}

#[test]
fn test_other_tickers_and_unsorted_input() {
    let mut prices = three_day_prices();
    prices.reverse();
    prices.push(crate::model::PricePoint::new("Y", date(2024, 1, 2), 500.0));
    let dividends = vec![
        DividendEvent::new("Y", date(2024, 1, 2), 50.0),
        DividendEvent::new("X", date(2024, 1, 2), 1.0),
    ];
    let request = RequestBuilder::new("X")
        .start(2024, 1, 1)
        .end(2024, 1, 3)
        .shares(10.0)
        .build()
        .unwrap();

    let result = simulate(&prices, &dividends, &request).unwrap();
    let dates: Vec<_> = result.records.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
    assert_close(result.records[2].true_value, 130.0, "true value");
    assert_eq!(result.ledger.len(), 1);
}
