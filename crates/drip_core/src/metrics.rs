//! Simulation instrumentation
//!
//! Counters collected during a walk, useful for spotting data-quality
//! problems in the source tables (many dropped dividends usually means the
//! dividend sheet uses a different date convention than the price sheet).

use serde::{Deserialize, Serialize};

/// Counters collected by [`crate::simulation::simulate_with_metrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Price rows walked (equals the number of daily records)
    pub rows_walked: u64,
    /// Price rows ignored because their date was already seen
    pub duplicate_rows: u64,
    /// Dividend events inside the request range
    pub dividends_in_range: u64,
    pub dividends_applied: u64,
    pub dividends_dropped: u64,
    pub dividends_skipped: u64,
}

impl SimulationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_row(&mut self) {
        self.rows_walked += 1;
    }

    pub fn record_duplicate_row(&mut self) {
        self.duplicate_rows += 1;
    }

    pub fn record_applied(&mut self) {
        self.dividends_applied += 1;
    }

    pub fn record_dropped(&mut self) {
        self.dividends_dropped += 1;
    }

    pub fn record_skipped(&mut self) {
        self.dividends_skipped += 1;
    }

    /// Every in-range event is either applied, dropped or skipped
    #[must_use]
    pub fn dividends_accounted(&self) -> u64 {
        self.dividends_applied + self.dividends_dropped + self.dividends_skipped
    }

    /// Share of in-range dividends that never reached the position
    #[must_use]
    pub fn drop_rate(&self) -> f64 {
        if self.dividends_in_range == 0 {
            0.0
        } else {
            (self.dividends_dropped + self.dividends_skipped) as f64
                / self.dividends_in_range as f64
        }
    }
}
