//! Command dispatch
//!
//! Resolves the data directory, config and table paths, runs the requested
//! command and renders its output.

use std::io::Write;
use std::path::PathBuf;

use color_eyre::eyre::{Report, WrapErr};
use color_eyre::{Result, Section};
use drip_core::model::{DividendPolicy, UnmatchedDividendPolicy};
use drip_core::{RequestBuilder, SimError, compare, simulate_with_metrics};

use crate::cli::{Cli, Command, CompareArgs, ListArgs, PolicyArgs, SimulateArgs};
use crate::data::{AppConfig, DataDirectory, MarketTables, OutputFormat, SourcePaths};
use crate::report::{self, SimulationReport};

/// Data directory from the command line, or `~/.drip/`
pub fn resolve_data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(DataDirectory::default_path)
}

/// Run `cli`, writing command output to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let data_dir = DataDirectory::new(resolve_data_dir(cli));

    match &cli.command {
        Command::Init { force } => init(&data_dir, *force, out),
        Command::Simulate(args) => Session::open(cli, data_dir)?.simulate(args, out),
        Command::Compare(args) => Session::open(cli, data_dir)?.compare(args, out),
        Command::Tickers(args) => Session::open(cli, data_dir)?.tickers(args, out),
    }
}

fn init<W: Write>(data_dir: &DataDirectory, force: bool, out: &mut W) -> Result<()> {
    let path = data_dir.config_path();
    let written = data_dir
        .init(force)
        .wrap_err_with(|| format!("Failed to initialize {}", data_dir.root().display()))?;

    if written {
        tracing::info!(path = %path.display(), "default config written");
        writeln!(out, "Wrote default config to {}", path.display())?;
    } else {
        writeln!(
            out,
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )?;
    }
    Ok(())
}

/// Config and source locations for one invocation
#[derive(Debug)]
pub struct Session {
    pub config: AppConfig,
    pub sources: SourcePaths,
}

impl Session {
    /// Load config.yaml and apply command-line overrides.
    ///
    /// Paths from config.yaml are relative to the data directory; paths
    /// given on the command line are used as-is.
    pub fn open(cli: &Cli, data_dir: DataDirectory) -> Result<Self> {
        let config = data_dir
            .load_config()
            .wrap_err("Failed to load config.yaml")
            .suggestion("Run `drip init --force` to write a fresh config")?;

        let sources = SourcePaths {
            prices: cli
                .prices
                .clone()
                .unwrap_or_else(|| data_dir.resolve(&config.prices_path)),
            dividends: cli
                .dividends
                .clone()
                .unwrap_or_else(|| data_dir.resolve(&config.dividends_path)),
            metadata: cli.metadata.clone().or_else(|| {
                config
                    .metadata_path
                    .as_deref()
                    .map(|path| data_dir.resolve(path))
            }),
        };
        tracing::debug!(?sources, "session opened");

        Ok(Self { config, sources })
    }

    fn load_tables(&self) -> Result<MarketTables> {
        MarketTables::load(&self.sources)
            .wrap_err("Failed to load source tables")
            .suggestion("Check --prices/--dividends or the paths in config.yaml")
    }

    fn policy(&self, args: &PolicyArgs) -> DividendPolicy {
        let reinvest = match (args.reinvest, args.cash_payouts) {
            (true, _) => true,
            (_, true) => false,
            _ => self.config.reinvest,
        };
        DividendPolicy::from_reinvest(reinvest)
    }

    fn unmatched(&self, args: &PolicyArgs) -> UnmatchedDividendPolicy {
        if args.snap_dividends || self.config.snap_dividends {
            UnmatchedDividendPolicy::NextTradingDay
        } else {
            UnmatchedDividendPolicy::Drop
        }
    }

    fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.config.format)
    }

    /// Builder with the policy flags applied and missing dates filled from `span`
    fn builder(
        &self,
        ticker: &str,
        args: &PolicyArgs,
        span: Option<(jiff::civil::Date, jiff::civil::Date)>,
    ) -> RequestBuilder {
        let mut builder = RequestBuilder::new(ticker)
            .policy(self.policy(args))
            .unmatched(self.unmatched(args));
        if let Some(start) = args.start.or(span.map(|(start, _)| start)) {
            builder = builder.start_date(start);
        }
        if let Some(end) = args.end.or(span.map(|(_, end)| end)) {
            builder = builder.end_date(end);
        }
        builder
    }

    pub fn simulate<W: Write>(&self, args: &SimulateArgs, out: &mut W) -> Result<()> {
        let tables = self.load_tables()?;
        let ticker = args.ticker.as_str();

        // An unknown ticker still gets a range so the simulator reports NoPriceData
        let span = tables.date_span(ticker).or_else(|| tables.full_span());
        let builder = self.builder(ticker, &args.policy, span);
        let builder = match (args.shares, args.cash) {
            (Some(shares), _) => builder.shares(shares),
            (None, Some(cash)) => builder.cash(cash),
            (None, None) => builder.cash(self.config.default_cash),
        };
        let request = builder.build().map_err(|e| explain(e, ticker))?;

        let (result, metrics) = simulate_with_metrics(&tables.prices, &tables.dividends, &request)
            .map_err(|e| explain(e, ticker))?;
        tracing::info!(
            ticker,
            policy = request.policy.label(),
            days = metrics.rows_walked,
            applied = metrics.dividends_applied,
            dropped = metrics.dividends_dropped,
            skipped = metrics.dividends_skipped,
            "simulation complete"
        );

        let report = SimulationReport::new(&result, tables.metadata_for(ticker));
        report::write_simulation(out, &report, self.format(args.policy.format), args.daily)
            .wrap_err("Failed to write simulation output")
    }

    pub fn compare<W: Write>(&self, args: &CompareArgs, out: &mut W) -> Result<()> {
        let tables = self.load_tables()?;
        let label = args.tickers.join(", ");

        // Histories that never overlap fall back to their union so each
        // ticker still gets its own outcome
        let span = tables
            .common_span(&args.tickers)
            .or_else(|| tables.union_span(&args.tickers))
            .or_else(|| tables.full_span());
        let request = self
            .builder(&label, &args.policy, span)
            .cash(args.cash.unwrap_or(self.config.default_cash))
            .build_comparison(args.tickers.iter().cloned())
            .map_err(|e| explain(e, &label))?;

        let outcomes = compare(&tables.prices, &tables.dividends, &request);
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::info!(
            tickers = outcomes.len(),
            failed,
            policy = request.policy.label(),
            "comparison complete"
        );

        report::write_comparison(out, &outcomes, self.format(args.policy.format))
            .wrap_err("Failed to write comparison output")
    }

    pub fn tickers<W: Write>(&self, args: &ListArgs, out: &mut W) -> Result<()> {
        let tables = self.load_tables()?;
        let mut stats = tables.ticker_stats();
        if let Some(issuer) = &args.issuer {
            stats.retain(|s| tables.issued_by(&s.ticker, issuer));
        }
        if args.newest {
            stats.sort_by(|a, b| b.first_date.cmp(&a.first_date).then(a.ticker.cmp(&b.ticker)));
        }
        tracing::debug!(tickers = stats.len(), issuer = ?args.issuer, "listing tickers");

        report::write_tickers(out, &stats, &tables.metadata, self.format(args.format))
            .wrap_err("Failed to write ticker list")
    }
}

/// Attach a context line and a concrete hint to a simulator error
fn explain(err: SimError, ticker: &str) -> Report {
    let suggestion = match &err {
        SimError::InvalidRange { .. } => "--start must be on or before --end",
        SimError::NoPriceData { .. } => {
            "Run `drip tickers` to see which tickers and dates the price table covers"
        }
        SimError::InvalidPosition { .. } => "--shares and --cash take a positive amount",
        SimError::InvalidEntryPrice { .. } => {
            "The entry-day close is not usable; size the position with --shares instead"
        }
        SimError::Config(_) => "Pass --start and --end, or check that the ticker has price rows",
    };
    Report::new(err)
        .wrap_err(format!("Cannot simulate {ticker}"))
        .suggestion(suggestion)
}
