//! Command-line front end for the dividend total-return simulator
//!
//! This crate loads price, dividend and fund metadata tables from CSV and
//! renders `drip_core` simulations as text tables, JSON or CSV.
//! It provides:
//! - A data directory (`~/.drip/`) with a YAML config and a rotating log file
//! - Tolerant CSV loading with column aliases and spreadsheet-style values
//! - `simulate`, `compare`, `tickers` and `init` commands

pub mod app;
pub mod cli;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

pub use app::{resolve_data_dir, run};
pub use cli::Cli;
pub use logging::init_logging;
