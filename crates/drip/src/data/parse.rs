//! Cell value coercion for spreadsheet exports
//!
//! Spreadsheet CSVs mix ISO and US dates and decorate numbers with currency
//! symbols and thousands separators. These helpers accept both.

use jiff::civil::Date;
use jiff::fmt::strtime;

const ISO_DATE: &str = "%Y-%m-%d";
const US_DATE: &str = "%m/%d/%Y";

/// Parse `YYYY-MM-DD`, an ISO timestamp, or `M/D/YYYY`.
pub fn parse_date(raw: &str) -> Result<Date, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("empty date".to_string());
    }

    let (format, date_part) = if value.contains('/') {
        (US_DATE, value)
    } else {
        // "2024-01-02 00:00:00" and "2024-01-02T00:00:00" keep only the date part
        let date_part = match value.find(['T', ' ']) {
            Some(idx) => &value[..idx],
            None => value,
        };
        (ISO_DATE, date_part)
    };

    strtime::parse(format, date_part)
        .and_then(|tm| tm.to_date())
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Parse a number, tolerating `$`, `,` separators and surrounding whitespace.
pub fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Err("empty amount".to_string());
    }
    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid amount '{}'", raw.trim()))?;
    if !amount.is_finite() {
        return Err(format!("invalid amount '{}'", raw.trim()));
    }
    Ok(amount)
}

/// Tickers are matched exactly by the simulator, so normalise them here
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Text cell, `None` when blank
pub fn optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}
