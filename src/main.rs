//! CLI entry point for vein network generation

use clap::Parser;
use tracing_subscriber::EnvFilter;
use venation::io::cli::{Cli, NetworkRunner};

fn main() -> venation::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut runner = NetworkRunner::new(cli);
    runner.run()?;
    Ok(())
}
