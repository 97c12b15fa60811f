//! Source tables supplied by the data loader
//!
//! These rows are immutable inputs. The simulator never reorders or edits the
//! caller's slices; it filters and sorts its own copies.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Closing price for one ticker on one trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub ticker: String,
    pub date: Date,
    pub close: f64,
}

impl PricePoint {
    pub fn new(ticker: impl Into<String>, date: Date, close: f64) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            close,
        }
    }
}

/// A per-share distribution paid to holders on `pay_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub ticker: String,
    pub pay_date: Date,
    pub amount_per_share: f64,
}

impl DividendEvent {
    pub fn new(ticker: impl Into<String>, pay_date: Date, amount_per_share: f64) -> Self {
        Self {
            ticker: ticker.into(),
            pay_date,
            amount_per_share,
        }
    }
}

/// Placeholder shown for metadata fields the source table does not fill in
pub const MISSING_FIELD: &str = "-";

/// Descriptive fund details keyed by ticker.
///
/// Never read by the simulator; the presentation layer uses it to label
/// results. Every field is optional and falls back to [`MISSING_FIELD`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundMetadata {
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
}

impl FundMetadata {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn underlying(&self) -> &str {
        self.underlying.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn issuer(&self) -> &str {
        self.issuer.as_deref().unwrap_or(MISSING_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_fallbacks() {
        let mut meta = FundMetadata::new("TSLY");
        assert_eq!(meta.name(), "-");
        assert_eq!(meta.underlying(), "-");
        assert_eq!(meta.issuer(), "-");

        meta.underlying = Some("TSLA".to_string());
        meta.issuer = Some("YieldMax".to_string());
        assert_eq!(meta.underlying(), "TSLA");
        assert_eq!(meta.issuer(), "YieldMax");
    }
}
