//! Termsguard CLI - Command-line interface for the termsguard rights scorer.

use clap::Parser;
use termsguard_cli::commands;
use termsguard_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> termsguard_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load config from --config or the default location
    let source = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Config::path().ok().filter(|path| path.exists()),
    };
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &config, &formatter).await?;
        }
        Command::Patterns => {
            commands::execute_patterns(&config, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, source.as_deref(), &formatter).await?;
        }
    }

    Ok(())
}
