//! CLI entry point for overlapping wave function collapse

use clap::Parser;
use overlapwfc::io::cli::{BatchRunner, Cli};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> overlapwfc::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut runner = BatchRunner::new(cli);
    runner.process()?;
    Ok(())
}
