//! Command-line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jiff::civil::Date;

use crate::data::OutputFormat;
use crate::data::parse::{normalize_ticker, parse_date};

#[derive(Parser, Debug)]
#[command(name = "drip")]
#[command(about = "Dividend total-return simulator for income funds")]
#[command(version)]
pub struct Cli {
    /// Path to the data directory (default: ~/.drip/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Price table, overrides config.yaml
    #[arg(long, global = true)]
    pub prices: Option<PathBuf>,

    /// Dividend table, overrides config.yaml
    #[arg(long, global = true)]
    pub dividends: Option<PathBuf>,

    /// Fund metadata table, overrides config.yaml
    #[arg(long, global = true)]
    pub metadata: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconstruct one position day by day
    Simulate(SimulateArgs),
    /// Compare total return of several tickers on the same budget
    Compare(CompareArgs),
    /// List tickers in the price table
    Tickers(ListArgs),
    /// Write a default config.yaml into the data directory
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by every command that runs the simulator
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// First day of the range (YYYY-MM-DD or M/D/YYYY); defaults to the first price
    #[arg(long, value_parser = parse_date)]
    pub start: Option<Date>,

    /// Last day of the range; defaults to the last price
    #[arg(long, value_parser = parse_date)]
    pub end: Option<Date>,

    /// Reinvest dividends at the pay-date close (DRIP)
    #[arg(long, conflicts_with = "cash_payouts")]
    pub reinvest: bool,

    /// Take dividends as cash even if config.yaml enables reinvestment
    #[arg(long)]
    pub cash_payouts: bool,

    /// Apply dividends paid on non-trading days on the next trading day
    #[arg(long)]
    pub snap_dividends: bool,

    /// Output format, overrides config.yaml
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(value_parser = parse_ticker)]
    pub ticker: String,

    /// Number of shares held at the start
    #[arg(long, conflicts_with = "cash")]
    pub shares: Option<f64>,

    /// Dollar amount invested at the entry price
    #[arg(long)]
    pub cash: Option<f64>,

    /// Print the day-by-day table
    #[arg(long)]
    pub daily: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[arg(required = true, num_args = 1.., value_parser = parse_ticker)]
    pub tickers: Vec<String>,

    /// Dollar amount invested in each ticker
    #[arg(long)]
    pub cash: Option<f64>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only funds whose issuer contains this text, e.g. "YieldMax"
    #[arg(long)]
    pub issuer: Option<String>,

    /// Most recently listed funds first, by first price date
    #[arg(long)]
    pub newest: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

fn parse_ticker(raw: &str) -> Result<String, String> {
    let ticker = normalize_ticker(raw);
    if ticker.is_empty() {
        return Err("ticker must not be empty".to_string());
    }
    Ok(ticker)
}
