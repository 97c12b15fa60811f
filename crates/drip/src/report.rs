//! Rendering of simulation, comparison and ticker listings
//!
//! Every renderer writes to a caller-supplied `Write` so the binary can target
//! stdout and tests can target a buffer.

use std::io::{self, Write};

use drip_core::model::{
    ComparisonOutcome, ComparisonSeries, DailyRecord, DividendOutcome, FundMetadata,
    IncomeDelta, SimulationResult, SummaryMetrics,
};
use jiff::civil::Date;
use serde::Serialize;

use crate::data::{OutputFormat, TickerStats};
use crate::util::format::{
    format_currency, format_optional_percent, format_shares, format_signed_percent,
};

/// Block characters for sub-character precision (from empty to full)
const BIN_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Widest trend line printed under a summary
const SPARKLINE_WIDTH: usize = 60;

/// A single run with the labels shown next to it
#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    pub metadata: Option<&'a FundMetadata>,
    pub summary: Option<SummaryMetrics>,
    pub result: &'a SimulationResult,
}

impl<'a> SimulationReport<'a> {
    pub fn new(result: &'a SimulationResult, metadata: Option<&'a FundMetadata>) -> Self {
        Self {
            metadata,
            summary: result.summary(),
            result,
        }
    }
}

pub fn write_simulation<W: Write>(
    out: &mut W,
    report: &SimulationReport<'_>,
    format: OutputFormat,
    daily: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_simulation_table(out, report, daily),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        OutputFormat::Csv => write_daily_csv(out, &report.result.records),
    }
}

fn write_simulation_table<W: Write>(
    out: &mut W,
    report: &SimulationReport<'_>,
    daily: bool,
) -> io::Result<()> {
    let result = report.result;
    let fallback = FundMetadata::new(&result.ticker);
    let meta = report.metadata.unwrap_or(&fallback);

    writeln!(out, "{}  {}", result.ticker, meta.name())?;
    writeln!(
        out,
        "Underlying: {}   Issuer: {}",
        meta.underlying(),
        meta.issuer()
    )?;
    writeln!(out, "Policy: {}", result.policy.label())?;

    let Some(summary) = &report.summary else {
        return writeln!(out, "No trading days in range.");
    };

    writeln!(
        out,
        "Period: {} to {} ({} days)",
        summary.start_date, summary.end_date, summary.days_held
    )?;
    writeln!(out)?;
    write_row(out, "Initial shares", &format_shares(summary.initial_shares))?;
    write_row(out, "Entry price", &format_currency(result.entry_price))?;
    write_row(out, "Initial capital", &format_currency(summary.initial_capital))?;
    write_row(
        out,
        "Final market value",
        &format_currency(summary.final_market_value),
    )?;
    match summary.income {
        IncomeDelta::Cash(cash) => write_row(out, "Cash distributed", &format_currency(cash))?,
        IncomeDelta::Shares(shares) => {
            write_row(out, "Shares gained", &format_shares(shares))?;
            write_row(out, "Final shares", &format_shares(summary.final_shares))?;
        }
    }
    write_row(out, "Final total value", &format_currency(summary.final_true_value))?;
    write_row(out, "Profit", &format_currency(summary.profit()))?;
    write_row(
        out,
        "Total return",
        &format_signed_percent(summary.total_return_pct),
    )?;
    write_row(
        out,
        "Annualized yield",
        &format_optional_percent(summary.annualized_yield_pct),
    )?;

    let (mut applied, mut dropped, mut skipped) = (0, 0, 0);
    for entry in &result.ledger {
        match entry.outcome {
            DividendOutcome::Paid { .. } | DividendOutcome::Reinvested { .. } => applied += 1,
            DividendOutcome::Dropped => dropped += 1,
            DividendOutcome::Skipped => skipped += 1,
        }
    }
    write_row(
        out,
        "Dividends",
        &format!(
            "{applied} applied, {dropped} dropped, {skipped} skipped ({})",
            format_currency(result.total_dividend_income())
        ),
    )?;

    let values: Vec<f64> = result.records.iter().map(|r| r.true_value).collect();
    writeln!(out, "\nTrend  {}", sparkline(&values, SPARKLINE_WIDTH))?;

    if daily {
        writeln!(out)?;
        write_daily_table(out, &result.records)?;
    }

    if !result.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for warning in &result.warnings {
            writeln!(out, "  - {}", warning.message())?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{:<20}{:>20}", format!("{label}:"), value)
}

fn write_daily_table<W: Write>(out: &mut W, records: &[DailyRecord]) -> io::Result<()> {
    writeln!(
        out,
        "{:<12}{:>12}{:>14}{:>14}{:>16}{:>16}",
        "Date", "Close", "Shares", "Cash", "Market value", "Total value"
    )?;
    for r in records {
        writeln!(
            out,
            "{:<12}{:>12}{:>14}{:>14}{:>16}{:>16}",
            r.date.to_string(),
            format_currency(r.close),
            format_shares(r.shares_held),
            format_currency(r.cash_distributed),
            format_currency(r.market_value),
            format_currency(r.true_value),
        )?;
    }
    Ok(())
}

fn write_daily_csv<W: Write>(out: &mut W, records: &[DailyRecord]) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()
}

/// Scale `values` onto block characters, sampling down to `width` points
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let step = values.len().div_ceil(width);
    let sampled: Vec<f64> = values.iter().step_by(step).copied().collect();
    let lo = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    let top = BIN_CHARS.len() - 1;

    sampled
        .iter()
        .map(|v| {
            if !range.is_finite() || range <= 0.0 {
                return BIN_CHARS[top / 2];
            }
            // Lowest bar is one block so flat stretches stay visible
            let level = 1 + (((v - lo) / range) * (top - 1) as f64).round() as usize;
            BIN_CHARS[level.min(top)]
        })
        .collect()
}

/// One ticker of a comparison, as emitted in JSON
#[derive(Debug, Serialize)]
struct ComparisonEntry<'a> {
    ticker: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<&'a ComparisonSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReturnRow<'a> {
    date: Date,
    ticker: &'a str,
    return_pct: f64,
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    outcomes: &[ComparisonOutcome],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_comparison_table(out, outcomes),
        OutputFormat::Json => {
            let entries: Vec<ComparisonEntry<'_>> = outcomes
                .iter()
                .map(|o| ComparisonEntry {
                    ticker: &o.ticker,
                    series: o.result.as_ref().ok(),
                    error: o.result.as_ref().err().map(ToString::to_string),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for outcome in outcomes {
                let Ok(series) = &outcome.result else {
                    continue;
                };
                for point in &series.points {
                    writer.serialize(ReturnRow {
                        date: point.date,
                        ticker: &series.ticker,
                        return_pct: point.return_pct,
                    })?;
                }
            }
            writer.flush()
        }
    }
}

fn write_comparison_table<W: Write>(out: &mut W, outcomes: &[ComparisonOutcome]) -> io::Result<()> {
    writeln!(
        out,
        "{:<8}{:>12}{:>14}{:>16}  Trend",
        "Ticker", "Return", "Ann. yield", "Final value"
    )?;
    for outcome in outcomes {
        match &outcome.result {
            Ok(series) => {
                let values: Vec<f64> = series.points.iter().map(|p| p.return_pct).collect();
                writeln!(
                    out,
                    "{:<8}{:>12}{:>14}{:>16}  {}",
                    outcome.ticker,
                    format_signed_percent(series.final_return_pct()),
                    format_optional_percent(series.summary.annualized_yield_pct),
                    format_currency(series.summary.final_true_value),
                    sparkline(&values, 30),
                )?;
            }
            Err(err) => writeln!(out, "{:<8}  error: {err}", outcome.ticker)?,
        }
    }
    Ok(())
}

/// Ticker listing with metadata labels, as emitted in JSON
#[derive(Debug, Serialize)]
struct TickerRow<'a> {
    ticker: &'a str,
    name: &'a str,
    underlying: &'a str,
    issuer: &'a str,
    first_date: Date,
    last_date: Date,
    price_rows: usize,
    dividend_count: usize,
}

pub fn write_tickers<W: Write>(
    out: &mut W,
    stats: &[TickerStats],
    metadata: &[FundMetadata],
    format: OutputFormat,
) -> io::Result<()> {
    let fallbacks: Vec<FundMetadata> = stats.iter().map(|s| FundMetadata::new(&s.ticker)).collect();
    let rows: Vec<TickerRow<'_>> = stats
        .iter()
        .zip(&fallbacks)
        .map(|(s, fallback)| {
            let meta = metadata
                .iter()
                .find(|m| m.ticker == s.ticker)
                .unwrap_or(fallback);
            TickerRow {
                ticker: &s.ticker,
                name: meta.name(),
                underlying: meta.underlying(),
                issuer: meta.issuer(),
                first_date: s.first_date,
                last_date: s.last_date,
                price_rows: s.price_rows,
                dividend_count: s.dividend_count,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                return writeln!(out, "No tickers in the price table.");
            }
            writeln!(
                out,
                "{:<8}{:<36}{:<12}{:<14}{:<12}{:<12}{:>8}{:>8}",
                "Ticker", "Name", "Underlying", "Issuer", "First", "Last", "Prices", "Divs"
            )?;
            for row in &rows {
                writeln!(
                    out,
                    "{:<8}{:<36}{:<12}{:<14}{:<12}{:<12}{:>8}{:>8}",
                    row.ticker,
                    row.name,
                    row.underlying,
                    row.issuer,
                    row.first_date.to_string(),
                    row.last_date.to_string(),
                    row.price_rows,
                    row.dividend_count,
                )?;
            }
            Ok(())
        }
    }
}
