//! Simulation request types

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Initial position, either a share count or a dollar amount.
///
/// A dollar amount is converted to shares at the entry price (the close on the
/// first trading day on or after the start date).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionSize {
    Shares(f64),
    Cash(f64),
}

impl PositionSize {
    /// The raw amount, shares or dollars
    pub fn amount(&self) -> f64 {
        match self {
            PositionSize::Shares(n) => *n,
            PositionSize::Cash(d) => *d,
        }
    }
}

/// What happens to a dividend payout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DividendPolicy {
    /// Payouts accumulate as cash next to the position
    #[default]
    Cash,
    /// Payouts buy fractional shares at that day's close (DRIP)
    Reinvest,
}

impl DividendPolicy {
    pub fn from_reinvest(reinvest: bool) -> Self {
        if reinvest {
            DividendPolicy::Reinvest
        } else {
            DividendPolicy::Cash
        }
    }

    pub fn reinvests(&self) -> bool {
        matches!(self, DividendPolicy::Reinvest)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DividendPolicy::Cash => "Cash payouts",
            DividendPolicy::Reinvest => "DRIP",
        }
    }
}

/// Treatment of dividends whose pay date has no price row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnmatchedDividendPolicy {
    /// Ignore the event. Matches how the dashboard spreadsheets behaved.
    #[default]
    Drop,
    /// Apply the event on the next trading day present in the price series
    NextTradingDay,
}

/// Everything needed to reconstruct one position over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub ticker: String,
    pub start_date: Date,
    pub end_date: Date,
    pub position: PositionSize,
    #[serde(default)]
    pub policy: DividendPolicy,
    #[serde(default)]
    pub unmatched: UnmatchedDividendPolicy,
}

impl SimulationRequest {
    pub fn new(
        ticker: impl Into<String>,
        start_date: Date,
        end_date: Date,
        position: PositionSize,
        policy: DividendPolicy,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            start_date,
            end_date,
            position,
            policy,
            unmatched: UnmatchedDividendPolicy::default(),
        }
    }

    /// Whether `date` falls inside the inclusive request range
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Head-to-head comparison of several tickers over a shared range and budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub tickers: Vec<String>,
    pub start_date: Date,
    pub end_date: Date,
    /// Hypothetical dollar amount invested in each ticker
    pub initial_cash: f64,
    #[serde(default)]
    pub policy: DividendPolicy,
    #[serde(default)]
    pub unmatched: UnmatchedDividendPolicy,
}

impl ComparisonRequest {
    /// The single-ticker request used for `ticker`
    pub fn request_for(&self, ticker: &str) -> SimulationRequest {
        SimulationRequest {
            ticker: ticker.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            position: PositionSize::Cash(self.initial_cash),
            policy: self.policy,
            unmatched: self.unmatched,
        }
    }
}
