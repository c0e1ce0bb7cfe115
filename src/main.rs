//! Prat CLI entry point.

use anyhow::Result;
use clap::Parser;
use prat::cli::{commands, Cli, Commands};
use prat::config::{Credentials, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("prat={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Credentials are read from the environment once, here, and passed
    // explicitly everywhere else.
    let credentials = Credentials::from_env();

    // Execute command
    match cli.command {
        Commands::Init => {
            commands::run_init(&settings, &credentials)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &credentials)?;
        }

        Commands::Generate { url, pdf, text, strategy } => {
            commands::run_generate(url, pdf, text, strategy, settings, credentials).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(&host, port, settings, credentials).await?;
        }
    }

    Ok(())
}
