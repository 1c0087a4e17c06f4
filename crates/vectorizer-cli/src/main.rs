//! Vectorizer — chunk documents from the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli.command.run(&mut out)
}
