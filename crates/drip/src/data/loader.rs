//! CSV loading for the price, dividend and fund metadata tables

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use drip_core::model::{DividendEvent, FundMetadata, PricePoint};
use jiff::civil::Date;

use super::columns::{
    Column, ColumnMap, ColumnSpec, DIVIDEND_COLUMNS, METADATA_COLUMNS, PRICE_COLUMNS,
};
use super::parse::{normalize_ticker, optional_text, parse_amount, parse_date};

/// Error types for table loading
#[derive(Debug)]
pub enum LoadError {
    Io { path: String, message: String },
    Csv { path: String, message: String },
    MissingColumn { path: String, column: &'static str },
    Row { path: String, line: u64, message: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "{path}: {message}"),
            LoadError::Csv { path, message } => write!(f, "{path}: malformed CSV: {message}"),
            LoadError::MissingColumn { path, column } => {
                write!(f, "{path}: no '{column}' column in header row")
            }
            LoadError::Row {
                path,
                line,
                message,
            } => write!(f, "{path}, line {line}: {message}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Locations of the three source tables
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub prices: PathBuf,
    pub dividends: PathBuf,
    pub metadata: Option<PathBuf>,
}

/// Per-ticker coverage of the loaded tables
#[derive(Debug, Clone, PartialEq)]
pub struct TickerStats {
    pub ticker: String,
    pub first_date: Date,
    pub last_date: Date,
    pub price_rows: usize,
    pub dividend_count: usize,
}

/// In-memory snapshot of the source tables handed to the simulator
#[derive(Debug, Clone, Default)]
pub struct MarketTables {
    pub prices: Vec<PricePoint>,
    pub dividends: Vec<DividendEvent>,
    pub metadata: Vec<FundMetadata>,
}

impl MarketTables {
    /// Load all tables. A missing metadata file is not an error.
    pub fn load(paths: &SourcePaths) -> Result<Self, LoadError> {
        let prices = load_prices(&paths.prices)?;
        let dividends = load_dividends(&paths.dividends)?;
        let metadata = match &paths.metadata {
            Some(path) if path.exists() => load_metadata(path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "metadata table not found, skipping");
                Vec::new()
            }
            None => Vec::new(),
        };

        tracing::info!(
            prices = prices.len(),
            dividends = dividends.len(),
            metadata = metadata.len(),
            "source tables loaded"
        );
        Ok(Self {
            prices,
            dividends,
            metadata,
        })
    }

    pub fn metadata_for(&self, ticker: &str) -> Option<&FundMetadata> {
        self.metadata.iter().find(|m| m.ticker == ticker)
    }

    /// First and last price date for `ticker`
    pub fn date_span(&self, ticker: &str) -> Option<(Date, Date)> {
        span_of(
            self.prices
                .iter()
                .filter(|p| p.ticker == ticker)
                .map(|p| p.date),
        )
    }

    /// First and last date of the whole price table
    pub fn full_span(&self) -> Option<(Date, Date)> {
        span_of(self.prices.iter().map(|p| p.date))
    }

    /// Window covered by every ticker in `tickers`, if they overlap at all
    pub fn common_span<S: AsRef<str>>(&self, tickers: &[S]) -> Option<(Date, Date)> {
        let mut span: Option<(Date, Date)> = None;
        for ticker in tickers {
            // Unknown tickers are reported by the simulator, not here
            let Some((lo, hi)) = self.date_span(ticker.as_ref()) else {
                continue;
            };
            span = Some(match span {
                Some((start, end)) => (start.max(lo), end.min(hi)),
                None => (lo, hi),
            });
        }
        span.filter(|(start, end)| start <= end)
    }

    /// Earliest to latest price of any ticker in `tickers`
    pub fn union_span<S: AsRef<str>>(&self, tickers: &[S]) -> Option<(Date, Date)> {
        let spans: Vec<(Date, Date)> = tickers
            .iter()
            .filter_map(|t| self.date_span(t.as_ref()))
            .collect();
        let start = spans.iter().map(|(start, _)| *start).min()?;
        let end = spans.iter().map(|(_, end)| *end).max()?;
        Some((start, end))
    }

    /// Whether the metadata table lists `issuer` for `ticker`, ignoring case.
    /// A partial name matches, so "yieldmax" finds "YieldMax ETFs".
    pub fn issued_by(&self, ticker: &str, issuer: &str) -> bool {
        let needle = issuer.trim().to_lowercase();
        self.metadata_for(ticker)
            .and_then(|m| m.issuer.as_deref())
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    }

    /// Coverage per ticker, sorted by ticker
    pub fn ticker_stats(&self) -> Vec<TickerStats> {
        let mut stats: BTreeMap<&str, TickerStats> = BTreeMap::new();
        for price in &self.prices {
            stats
                .entry(price.ticker.as_str())
                .and_modify(|s| {
                    s.first_date = s.first_date.min(price.date);
                    s.last_date = s.last_date.max(price.date);
                    s.price_rows += 1;
                })
                .or_insert_with(|| TickerStats {
                    ticker: price.ticker.clone(),
                    first_date: price.date,
                    last_date: price.date,
                    price_rows: 1,
                    dividend_count: 0,
                });
        }
        for dividend in &self.dividends {
            if let Some(s) = stats.get_mut(dividend.ticker.as_str()) {
                s.dividend_count += 1;
            }
        }
        stats.into_values().collect()
    }
}

fn span_of(mut dates: impl Iterator<Item = Date>) -> Option<(Date, Date)> {
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

pub fn load_prices(path: &Path) -> Result<Vec<PricePoint>, LoadError> {
    read_prices(open(path)?, &path.display().to_string())
}

pub fn load_dividends(path: &Path) -> Result<Vec<DividendEvent>, LoadError> {
    read_dividends(open(path)?, &path.display().to_string())
}

pub fn load_metadata(path: &Path) -> Result<Vec<FundMetadata>, LoadError> {
    read_metadata(open(path)?, &path.display().to_string())
}

pub fn read_prices<R: Read>(reader: R, source: &str) -> Result<Vec<PricePoint>, LoadError> {
    read_table(reader, source, PRICE_COLUMNS, |row| {
        Ok(PricePoint {
            ticker: row.ticker()?,
            date: parse_date(row.cell(Column::Date))?,
            close: parse_amount(row.cell(Column::Close))?,
        })
    })
}

pub fn read_dividends<R: Read>(reader: R, source: &str) -> Result<Vec<DividendEvent>, LoadError> {
    read_table(reader, source, DIVIDEND_COLUMNS, |row| {
        Ok(DividendEvent {
            ticker: row.ticker()?,
            pay_date: parse_date(row.cell(Column::PayDate))?,
            amount_per_share: parse_amount(row.cell(Column::Amount))?,
        })
    })
}

pub fn read_metadata<R: Read>(reader: R, source: &str) -> Result<Vec<FundMetadata>, LoadError> {
    let rows = read_table(reader, source, METADATA_COLUMNS, |row| {
        Ok(FundMetadata {
            ticker: row.ticker()?,
            name: optional_text(row.cell(Column::Name)),
            underlying: optional_text(row.cell(Column::Underlying)),
            issuer: optional_text(row.cell(Column::Issuer)),
        })
    })?;

    // First row per ticker wins
    let mut seen = std::collections::HashSet::new();
    Ok(rows
        .into_iter()
        .filter(|m| seen.insert(m.ticker.clone()))
        .collect())
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// A data row with its resolved column positions
struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a ColumnMap,
}

impl Row<'_> {
    /// Cell text, empty when the column is absent or the row is short
    fn cell(&self, column: Column) -> &str {
        self.columns
            .index(column)
            .and_then(|idx| self.record.get(idx))
            .unwrap_or("")
    }

    fn ticker(&self) -> Result<String, String> {
        let ticker = normalize_ticker(self.cell(Column::Ticker));
        if ticker.is_empty() {
            return Err("missing ticker".to_string());
        }
        Ok(ticker)
    }
}

fn read_table<R, T, F>(
    reader: R,
    source: &str,
    specs: &[ColumnSpec],
    parse_row: F,
) -> Result<Vec<T>, LoadError>
where
    R: Read,
    F: Fn(&Row<'_>) -> Result<T, String>,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: source.to_string(),
            message: e.to_string(),
        })?
        .clone();
    let columns =
        ColumnMap::resolve(headers.iter(), specs).map_err(|column| LoadError::MissingColumn {
            path: source.to_string(),
            column: column.label(),
        })?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| LoadError::Csv {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = Row {
            record: &record,
            columns: &columns,
        };
        let value = parse_row(&row).map_err(|message| LoadError::Row {
            path: source.to_string(),
            line: record.position().map(|p| p.line()).unwrap_or(0),
            message,
        })?;
        rows.push(value);
    }

    tracing::debug!(source, rows = rows.len(), "table read");
    Ok(rows)
}
