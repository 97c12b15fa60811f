//! Headline metrics derived from a daily record sequence

use crate::date_math::{DAYS_PER_YEAR, days_between};
use crate::model::{DailyRecord, DividendPolicy, IncomeDelta, SummaryMetrics};

/// Percentage change from `initial` to `value`; zero when `initial` is zero.
#[inline]
pub fn percent_return(initial: f64, value: f64) -> f64 {
    if initial == 0.0 {
        0.0
    } else {
        (value - initial) / initial * 100.0
    }
}

/// Summarise a run from its first and last record.
///
/// Returns `None` for an empty slice. The annualised yield is only defined
/// for cash payouts over a holding period longer than zero days.
///
/// `initial_capital` is the first record's market value. When a dividend is
/// reinvested on that first day its shares are already in the first record,
/// so the same data reports a lower return under DRIP than under cash
/// payouts, where the payout is counted as gain.
#[must_use]
pub fn summarize(records: &[DailyRecord], policy: DividendPolicy) -> Option<SummaryMetrics> {
    let first = records.first()?;
    let last = records.last()?;

    let initial_capital = first.market_value;
    let days_held = days_between(first.date, last.date);

    let income = match policy {
        DividendPolicy::Cash => IncomeDelta::Cash(last.cash_distributed),
        DividendPolicy::Reinvest => IncomeDelta::Shares(last.shares_held - first.shares_held),
    };

    let annualized_yield_pct = match income {
        IncomeDelta::Cash(cash) if days_held > 0 && initial_capital != 0.0 => {
            Some((cash / initial_capital) * (DAYS_PER_YEAR / days_held as f64) * 100.0)
        }
        _ => None,
    };

    Some(SummaryMetrics {
        policy,
        start_date: first.date,
        end_date: last.date,
        days_held,
        initial_shares: first.shares_held,
        final_shares: last.shares_held,
        initial_capital,
        final_market_value: last.market_value,
        income,
        final_true_value: last.true_value,
        total_return_pct: percent_return(initial_capital, last.true_value),
        annualized_yield_pct,
    })
}
