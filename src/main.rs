use tech_interviewer::cli::args::Args;
// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("tech_interviewer={}", filter)
                    .parse()
                    .context("Invalid log directive")?,
            ),
        )
        .init();

    tech_interviewer::run(args).await
}
