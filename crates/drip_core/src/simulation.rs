//! Day-by-day reconstruction of a dividend-paying position
//!
//! The walk is a single pass over the date-ordered price rows, merged with
//! the pay-date-ordered dividend events. Running share and cash totals carry
//! forward from one row to the next, so shares bought by an earlier
//! reinvestment take part in every later payout.

use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::metrics::SimulationMetrics;
use crate::model::{
    DailyRecord, DividendEntry, DividendEvent, DividendOutcome, DividendPolicy, PositionSize,
    PricePoint, SimulationRequest, SimulationResult, SimulationWarning, UnmatchedDividendPolicy,
    WarningKind,
};

/// Run a simulation for `request` against the full price and dividend tables.
///
/// Both tables may hold rows for any number of tickers; rows for other
/// tickers or outside `[start_date, end_date]` are ignored.
pub fn simulate(
    prices: &[PricePoint],
    dividends: &[DividendEvent],
    request: &SimulationRequest,
) -> Result<SimulationResult> {
    simulate_with_metrics(prices, dividends, request).map(|(result, _)| result)
}

/// Same as [`simulate`], also returning instrumentation counters.
pub fn simulate_with_metrics(
    prices: &[PricePoint],
    dividends: &[DividendEvent],
    request: &SimulationRequest,
) -> Result<(SimulationResult, SimulationMetrics)> {
    validate_request(request)?;

    let mut metrics = SimulationMetrics::new();
    let mut warnings = Vec::new();

    let rows = price_rows(prices, request, &mut warnings, &mut metrics);
    let Some(entry) = rows.first() else {
        return Err(SimError::NoPriceData {
            ticker: request.ticker.clone(),
            start: request.start_date,
            end: request.end_date,
        });
    };
    let entry_price = entry.close;
    let initial_shares = resolve_initial_shares(request.position, entry)?;

    let events = dividend_events(dividends, request);
    metrics.dividends_in_range = events.len() as u64;

    let mut position = Position::new(initial_shares, request.policy);
    let mut records = Vec::with_capacity(rows.len());
    let mut ledger = Vec::with_capacity(events.len());
    let mut pending = events.iter().peekable();

    for row in &rows {
        while let Some(event) = pending.next_if(|e| e.pay_date <= row.date) {
            let on_trading_day = event.pay_date == row.date;
            if on_trading_day || request.unmatched == UnmatchedDividendPolicy::NextTradingDay {
                let applied = position.apply(event, row, &mut warnings);
                if applied.was_applied() {
                    metrics.record_applied();
                } else {
                    metrics.record_skipped();
                }
                ledger.push(applied);
            } else {
                ledger.push(drop_event(event, &mut warnings));
                metrics.record_dropped();
            }
        }

        records.push(position.record(row));
        metrics.record_row();
    }

    // Paid after the last available trading day in range
    for event in pending {
        ledger.push(drop_event(event, &mut warnings));
        metrics.record_dropped();
    }

    debug!(
        ticker = %request.ticker,
        rows = records.len(),
        dividends_applied = metrics.dividends_applied,
        dividends_dropped = metrics.dividends_dropped,
        "simulation complete"
    );

    let result = SimulationResult {
        ticker: request.ticker.clone(),
        policy: request.policy,
        initial_shares,
        entry_price,
        records,
        ledger,
        warnings,
    };
    Ok((result, metrics))
}

fn validate_request(request: &SimulationRequest) -> Result<()> {
    if request.start_date > request.end_date {
        return Err(SimError::InvalidRange {
            start: request.start_date,
            end: request.end_date,
        });
    }
    let amount = request.position.amount();
    if !amount.is_finite() || amount <= 0.0 {
        return Err(SimError::InvalidPosition { amount });
    }
    Ok(())
}

/// Rows for the requested ticker and range, ascending by date, one per date.
fn price_rows<'a>(
    prices: &'a [PricePoint],
    request: &SimulationRequest,
    warnings: &mut Vec<SimulationWarning>,
    metrics: &mut SimulationMetrics,
) -> Vec<&'a PricePoint> {
    let mut rows: Vec<&PricePoint> = prices
        .iter()
        .filter(|p| p.ticker == request.ticker && request.contains(p.date))
        .collect();
    rows.sort_by_key(|p| p.date);

    let mut unique: Vec<&PricePoint> = Vec::with_capacity(rows.len());
    for row in rows {
        if unique.last().is_some_and(|prev| prev.date == row.date) {
            warn!(ticker = %row.ticker, date = %row.date, "duplicate price row ignored");
            warnings.push(SimulationWarning::new(row.date, WarningKind::DuplicatePriceDate));
            metrics.record_duplicate_row();
            continue;
        }
        unique.push(row);
    }
    unique
}

/// Dividend events for the requested ticker and range, ascending by pay date.
fn dividend_events<'a>(
    dividends: &'a [DividendEvent],
    request: &SimulationRequest,
) -> Vec<&'a DividendEvent> {
    let mut events: Vec<&DividendEvent> = dividends
        .iter()
        .filter(|d| d.ticker == request.ticker && request.contains(d.pay_date))
        .collect();
    events.sort_by_key(|d| d.pay_date);
    events
}

fn resolve_initial_shares(position: PositionSize, entry: &PricePoint) -> Result<f64> {
    match position {
        PositionSize::Shares(shares) => Ok(shares),
        PositionSize::Cash(dollars) => {
            if !entry.close.is_finite() || entry.close <= 0.0 {
                return Err(SimError::InvalidEntryPrice {
                    date: entry.date,
                    price: entry.close,
                });
            }
            Ok(dollars / entry.close)
        }
    }
}

fn drop_event(event: &DividendEvent, warnings: &mut Vec<SimulationWarning>) -> DividendEntry {
    debug!(
        ticker = %event.ticker,
        pay_date = %event.pay_date,
        "dividend has no matching trading day, dropped"
    );
    warnings.push(SimulationWarning::new(
        event.pay_date,
        WarningKind::UnmatchedPayDate,
    ));
    DividendEntry {
        pay_date: event.pay_date,
        applied_on: None,
        amount_per_share: event.amount_per_share,
        outcome: DividendOutcome::Dropped,
    }
}

/// Running position state carried across the walk
#[derive(Debug, Clone, Copy)]
struct Position {
    shares: f64,
    cash: f64,
    policy: DividendPolicy,
}

impl Position {
    fn new(shares: f64, policy: DividendPolicy) -> Self {
        Self {
            shares,
            cash: 0.0,
            policy,
        }
    }

    /// Apply one dividend on the trading day `row`.
    fn apply(
        &mut self,
        event: &DividendEvent,
        row: &PricePoint,
        warnings: &mut Vec<SimulationWarning>,
    ) -> DividendEntry {
        let amount = event.amount_per_share;
        let outcome = if !amount.is_finite() || amount < 0.0 {
            warn!(ticker = %event.ticker, pay_date = %event.pay_date, amount, "invalid dividend amount");
            warnings.push(SimulationWarning::new(
                event.pay_date,
                WarningKind::InvalidDividendAmount { amount },
            ));
            DividendOutcome::Skipped
        } else {
            let payout = self.shares * amount;
            match self.policy {
                DividendPolicy::Cash => {
                    self.cash += payout;
                    DividendOutcome::Paid { cash: payout }
                }
                DividendPolicy::Reinvest if !row.close.is_finite() || row.close <= 0.0 => {
                    warn!(
                        ticker = %row.ticker,
                        date = %row.date,
                        price = row.close,
                        "anomalous reinvestment price, dividend skipped"
                    );
                    warnings.push(SimulationWarning::new(
                        row.date,
                        WarningKind::AnomalousReinvestment { price: row.close },
                    ));
                    DividendOutcome::Skipped
                }
                DividendPolicy::Reinvest => {
                    let shares_bought = payout / row.close;
                    self.shares += shares_bought;
                    DividendOutcome::Reinvested {
                        cash: payout,
                        shares_bought,
                        price: row.close,
                    }
                }
            }
        };

        DividendEntry {
            pay_date: event.pay_date,
            applied_on: Some(row.date),
            amount_per_share: amount,
            outcome,
        }
    }

    fn record(&self, row: &PricePoint) -> DailyRecord {
        let market_value = row.close * self.shares;
        let true_value = match self.policy {
            DividendPolicy::Cash => market_value + self.cash,
            DividendPolicy::Reinvest => market_value,
        };
        DailyRecord {
            date: row.date,
            close: row.close,
            shares_held: self.shares,
            cash_distributed: self.cash,
            market_value,
            true_value,
        }
    }
}
