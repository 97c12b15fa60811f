//! Dividend total-return simulation library
//!
//! Reconstructs a dividend-paying position day by day from a price series and
//! a dividend series. It supports:
//! - Cash payouts or dividend reinvestment (DRIP) with compounding share growth
//! - Sizing the position by share count or by dollar amount at the entry price
//! - A per-event dividend ledger and recovered-anomaly warnings
//! - Summary metrics (total return, annualised cash yield)
//! - Head-to-head comparison of several tickers on a shared budget
//!
//! The engine is pure and synchronous. Loading, caching and rendering the
//! source tables belong to the caller.
//!
//! ```ignore
//! use drip_core::{RequestBuilder, simulate};
//!
//! let request = RequestBuilder::new("JEPI")
//!     .start(2024, 1, 1)
//!     .end(2024, 12, 31)
//!     .cash(10_000.0)
//!     .reinvest()
//!     .build()?;
//! let result = simulate(&prices, &dividends, &request)?;
//! let summary = result.summary();
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod comparison;
pub mod date_math;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod summary;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use comparison::{compare, normalize};
pub use config::RequestBuilder;
pub use error::SimError;
pub use simulation::{simulate, simulate_with_metrics};
pub use summary::summarize;
