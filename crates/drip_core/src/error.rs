use std::fmt;

use jiff::civil::Date;

/// Errors returned by the simulator.
///
/// Recoverable data anomalies (a zero close on a reinvestment day, a dividend
/// with no matching trading day) are not errors; they are reported through
/// [`crate::model::SimulationWarning`] on the result.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The requested start date is after the end date
    InvalidRange { start: Date, end: Date },
    /// No price rows exist for the ticker inside the requested range
    NoPriceData {
        ticker: String,
        start: Date,
        end: Date,
    },
    /// Initial share count or cash amount is zero, negative or not finite
    InvalidPosition { amount: f64 },
    /// Cash sizing needs a positive entry price
    InvalidEntryPrice { date: Date, price: f64 },
    /// Incomplete request passed to the builder
    Config(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRange { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
            SimError::NoPriceData { ticker, start, end } => {
                write!(f, "no price data for {ticker} between {start} and {end}")
            }
            SimError::InvalidPosition { amount } => {
                write!(f, "initial position must be positive and finite (got {amount})")
            }
            SimError::InvalidEntryPrice { date, price } => {
                write!(f, "cannot size a cash position at entry price {price} on {date}")
            }
            SimError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;
