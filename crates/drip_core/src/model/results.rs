//! Simulation results and summaries
//!
//! Output types of the simulator: the day-by-day reconstruction, the dividend
//! ledger, and the derived metrics the presentation layer displays.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ledger::{DividendEntry, DividendOutcome, SimulationWarning};
use super::request::DividendPolicy;
use crate::error::SimError;

/// Position state at the close of one trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: Date,
    pub close: f64,
    pub shares_held: f64,
    /// Cumulative cash paid out so far; always zero under DRIP
    pub cash_distributed: f64,
    pub market_value: f64,
    /// Market value plus distributed cash
    pub true_value: f64,
}

/// Complete output of a single simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticker: String,
    pub policy: DividendPolicy,
    pub initial_shares: f64,
    pub entry_price: f64,
    /// One record per trading day in range, ordered by date. Never empty.
    pub records: Vec<DailyRecord>,
    /// One entry per dividend event in range, ordered by pay date
    pub ledger: Vec<DividendEntry>,
    pub warnings: Vec<SimulationWarning>,
}

impl SimulationResult {
    pub fn first(&self) -> Option<&DailyRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    /// Derived metrics for the whole run
    pub fn summary(&self) -> Option<SummaryMetrics> {
        crate::summary::summarize(&self.records, self.policy)
    }

    /// Total cash produced by applied dividends, whether paid or reinvested
    pub fn total_dividend_income(&self) -> f64 {
        self.ledger.iter().map(DividendEntry::payout).sum()
    }

    /// Ledger entries that actually changed the position
    pub fn applied_dividends(&self) -> impl Iterator<Item = &DividendEntry> {
        self.ledger.iter().filter(|e| e.was_applied())
    }

    /// Ledger entries ignored for lack of a trading day
    pub fn dropped_dividends(&self) -> impl Iterator<Item = &DividendEntry> {
        self.ledger
            .iter()
            .filter(|e| matches!(e.outcome, DividendOutcome::Dropped))
    }
}

/// Dividend effect at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IncomeDelta {
    /// Cumulative cash distributed
    Cash(f64),
    /// Shares gained through reinvestment
    Shares(f64),
}

/// Headline numbers derived from the first and last daily record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub policy: DividendPolicy,
    pub start_date: Date,
    pub end_date: Date,
    pub days_held: i32,
    pub initial_shares: f64,
    pub final_shares: f64,
    /// Market value of the first record
    pub initial_capital: f64,
    pub final_market_value: f64,
    pub income: IncomeDelta,
    pub final_true_value: f64,
    pub total_return_pct: f64,
    /// Only defined for cash payouts held longer than zero days
    pub annualized_yield_pct: Option<f64>,
}

impl SummaryMetrics {
    pub fn final_cash(&self) -> f64 {
        match self.income {
            IncomeDelta::Cash(c) => c,
            IncomeDelta::Shares(_) => 0.0,
        }
    }

    pub fn profit(&self) -> f64 {
        self.final_true_value - self.initial_capital
    }
}

/// One point of a normalised comparison series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: Date,
    /// Percentage return relative to the ticker's own initial capital
    pub return_pct: f64,
}

/// A ticker's total-return curve, comparable across tickers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub ticker: String,
    pub points: Vec<ReturnPoint>,
    pub summary: SummaryMetrics,
}

impl ComparisonSeries {
    pub fn final_return_pct(&self) -> f64 {
        self.points.last().map(|p| p.return_pct).unwrap_or(0.0)
    }
}

/// Per-ticker result of a comparison; failures do not abort the others
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub ticker: String,
    pub result: Result<ComparisonSeries, SimError>,
}
