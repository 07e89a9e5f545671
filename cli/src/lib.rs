use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;

type Result<T> = std::result::Result<T, error::Error>;

pub fn run() {
    init_tracing();

    let cli = cli::Cli::parse();
    cli.run();
}

/// Log to stderr so the bill on stdout stays machine readable. `RUST_LOG` overrides the filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
