//! CLI entry point for conhash.

use clap::Parser;
use conhash_cli::CliConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "conhash=debug",
        _ => "conhash=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_tracing(config.verbose);
    config.run()
}
