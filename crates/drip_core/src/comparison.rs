//! Head-to-head comparison of several tickers
//!
//! Each ticker is simulated on its own with the same range and dollar
//! amount, then its total-value curve is expressed as a percentage return on
//! its own initial capital so the curves can be overlaid.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rustc_hash::FxHashSet;

use crate::error::SimError;
use crate::model::{
    ComparisonOutcome, ComparisonRequest, ComparisonSeries, DividendEvent, PricePoint,
    ReturnPoint, SimulationResult,
};
use crate::simulation::simulate;
use crate::summary::{percent_return, summarize};

/// Simulate every ticker in `request`. Output order follows the request;
/// repeated tickers are simulated once.
pub fn compare(
    prices: &[PricePoint],
    dividends: &[DividendEvent],
    request: &ComparisonRequest,
) -> Vec<ComparisonOutcome> {
    let tickers = unique_tickers(&request.tickers);

    #[cfg(feature = "parallel")]
    let outcomes = tickers
        .into_par_iter()
        .map(|ticker| compare_one(prices, dividends, request, ticker))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes = tickers
        .into_iter()
        .map(|ticker| compare_one(prices, dividends, request, ticker))
        .collect();

    outcomes
}

fn compare_one(
    prices: &[PricePoint],
    dividends: &[DividendEvent],
    request: &ComparisonRequest,
    ticker: &str,
) -> ComparisonOutcome {
    let single = request.request_for(ticker);
    let result = simulate(prices, dividends, &single).and_then(|run| {
        normalize(&run).ok_or_else(|| SimError::NoPriceData {
            ticker: ticker.to_string(),
            start: single.start_date,
            end: single.end_date,
        })
    });
    if let Err(err) = &result {
        tracing::info!(ticker, "comparison skipped: {err}");
    }
    ComparisonOutcome {
        ticker: ticker.to_string(),
        result,
    }
}

/// Express a run's true value as percentage return on its initial capital.
///
/// `None` only when the run has no records.
pub fn normalize(result: &SimulationResult) -> Option<ComparisonSeries> {
    let summary = summarize(&result.records, result.policy)?;

    let points = result
        .records
        .iter()
        .map(|r| ReturnPoint {
            date: r.date,
            return_pct: percent_return(summary.initial_capital, r.true_value),
        })
        .collect();

    Some(ComparisonSeries {
        ticker: result.ticker.clone(),
        points,
        summary,
    })
}

fn unique_tickers(tickers: &[String]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    tickers
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect()
}
