use clap::Parser;
use drip::{Cli, init_logging, resolve_data_dir, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli);

    init_logging(&data_dir, &cli.log_level)?;

    let stdout = std::io::stdout();
    let result = run(&cli, &mut stdout.lock());
    if let Err(err) = &result {
        tracing::error!("command failed: {err:#}");
    }

    tracing::info!("drip shutting down");
    result
}
