//! Request Builder
//!
//! Fluent construction of a [`SimulationRequest`], validated on `build`.
//!
//! # Example
//!
//! ```ignore
//! use drip_core::config::RequestBuilder;
//!
//! let request = RequestBuilder::new("JEPI")
//!     .start(2024, 1, 1)
//!     .end(2024, 12, 31)
//!     .cash(10_000.0)
//!     .reinvest()
//!     .build()?;
//! ```

use jiff::civil::Date;

use crate::error::{Result, SimError};
use crate::model::{
    ComparisonRequest, DividendPolicy, PositionSize, SimulationRequest, UnmatchedDividendPolicy,
};

/// Builder for [`SimulationRequest`]
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    ticker: String,
    start_date: Option<Date>,
    end_date: Option<Date>,
    position: Option<PositionSize>,
    policy: DividendPolicy,
    unmatched: UnmatchedDividendPolicy,
}

impl RequestBuilder {
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            start_date: None,
            end_date: None,
            position: None,
            policy: DividendPolicy::default(),
            unmatched: UnmatchedDividendPolicy::default(),
        }
    }

    // =========================================================================
    // Date range
    // =========================================================================

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the start date (convenience method)
    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Set the end date (convenience method)
    #[must_use]
    pub fn end(self, year: i16, month: i8, day: i8) -> Self {
        self.end_date(jiff::civil::date(year, month, day))
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Start with a fixed number of shares
    #[must_use]
    pub fn shares(mut self, shares: f64) -> Self {
        self.position = Some(PositionSize::Shares(shares));
        self
    }

    /// Start with a dollar amount bought at the entry price
    #[must_use]
    pub fn cash(mut self, dollars: f64) -> Self {
        self.position = Some(PositionSize::Cash(dollars));
        self
    }

    // =========================================================================
    // Policies
    // =========================================================================

    #[must_use]
    pub fn policy(mut self, policy: DividendPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reinvest dividends (DRIP)
    #[must_use]
    pub fn reinvest(self) -> Self {
        self.policy(DividendPolicy::Reinvest)
    }

    /// Pay dividends out as cash
    #[must_use]
    pub fn cash_payouts(self) -> Self {
        self.policy(DividendPolicy::Cash)
    }

    #[must_use]
    pub fn unmatched(mut self, unmatched: UnmatchedDividendPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Apply dividends paid on non-trading days on the next trading day
    #[must_use]
    pub fn snap_to_next_trading_day(self) -> Self {
        self.unmatched(UnmatchedDividendPolicy::NextTradingDay)
    }

    // =========================================================================
    // Build
    // =========================================================================

    pub fn build(self) -> Result<SimulationRequest> {
        let (start_date, end_date) = resolve_range(self.start_date, self.end_date)?;
        let position = self
            .position
            .ok_or_else(|| SimError::Config("initial shares or cash amount is required".into()))?;
        if self.ticker.trim().is_empty() {
            return Err(SimError::Config("ticker is required".into()));
        }

        Ok(SimulationRequest {
            ticker: self.ticker,
            start_date,
            end_date,
            position,
            policy: self.policy,
            unmatched: self.unmatched,
        })
    }

    /// Build a comparison of `tickers` sharing this builder's range and policies.
    ///
    /// The position must be a cash amount so every ticker gets the same budget.
    pub fn build_comparison<I, S>(self, tickers: I) -> Result<ComparisonRequest>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (start_date, end_date) = resolve_range(self.start_date, self.end_date)?;
        let initial_cash = match self.position {
            Some(PositionSize::Cash(dollars)) => dollars,
            Some(PositionSize::Shares(_)) => {
                return Err(SimError::Config(
                    "comparisons need a cash amount, not a share count".into(),
                ));
            }
            None => return Err(SimError::Config("cash amount is required".into())),
        };
        let tickers: Vec<String> = tickers.into_iter().map(Into::into).collect();
        if tickers.is_empty() {
            return Err(SimError::Config("at least one ticker is required".into()));
        }

        Ok(ComparisonRequest {
            tickers,
            start_date,
            end_date,
            initial_cash,
            policy: self.policy,
            unmatched: self.unmatched,
        })
    }
}

fn resolve_range(start: Option<Date>, end: Option<Date>) -> Result<(Date, Date)> {
    let start = start.ok_or_else(|| SimError::Config("start date is required".into()))?;
    let end = end.ok_or_else(|| SimError::Config("end date is required".into()))?;
    if start > end {
        return Err(SimError::InvalidRange { start, end });
    }
    Ok((start, end))
}
