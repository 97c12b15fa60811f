//! Dividend ledger and anomaly warnings
//!
//! Every dividend event inside the request range produces exactly one
//! [`DividendEntry`], so a caller can audit which events moved the position
//! and which were dropped or skipped.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// What the simulator did with a single dividend event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DividendOutcome {
    /// Credited as cash
    Paid { cash: f64 },
    /// Converted into additional shares at `price`
    Reinvested {
        cash: f64,
        shares_bought: f64,
        price: f64,
    },
    /// No trading day to apply it on
    Dropped,
    /// Data anomaly; the event was ignored
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEntry {
    pub pay_date: Date,
    /// Trading day the event was applied on, `None` when dropped
    pub applied_on: Option<Date>,
    pub amount_per_share: f64,
    pub outcome: DividendOutcome,
}

impl DividendEntry {
    /// Cash generated by this event, zero when dropped or skipped
    pub fn payout(&self) -> f64 {
        match self.outcome {
            DividendOutcome::Paid { cash } | DividendOutcome::Reinvested { cash, .. } => cash,
            DividendOutcome::Dropped | DividendOutcome::Skipped => 0.0,
        }
    }

    pub fn was_applied(&self) -> bool {
        matches!(
            self.outcome,
            DividendOutcome::Paid { .. } | DividendOutcome::Reinvested { .. }
        )
    }
}

/// Kinds of recovered data anomalies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Reinvestment skipped because the close was zero, negative or NaN
    AnomalousReinvestment { price: f64 },
    /// Pay date has no matching price row and the event was dropped
    UnmatchedPayDate,
    /// Negative or non-finite per-share amount
    InvalidDividendAmount { amount: f64 },
    /// More than one price row for the same date; the first was kept
    DuplicatePriceDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationWarning {
    pub date: Date,
    pub kind: WarningKind,
}

impl SimulationWarning {
    pub fn new(date: Date, kind: WarningKind) -> Self {
        Self { date, kind }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            WarningKind::AnomalousReinvestment { price } => {
                format!("{}: reinvestment skipped at price {price}", self.date)
            }
            WarningKind::UnmatchedPayDate => {
                format!("{}: dividend paid on a non-trading day was dropped", self.date)
            }
            WarningKind::InvalidDividendAmount { amount } => {
                format!("{}: ignored invalid dividend amount {amount}", self.date)
            }
            WarningKind::DuplicatePriceDate => {
                format!("{}: duplicate price row ignored", self.date)
            }
        }
    }
}
