//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Termsguard CLI - Score Terms of Service and privacy policies for user-rights risk.
#[derive(Debug, Parser)]
#[command(name = "termsguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TERMSGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log engine activity at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a document and print its rights score
    Analyze(AnalyzeArgs),

    /// List the clause catalog with its weights
    Patterns,

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Document to analyze
    pub file: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Print a built-in preset instead of the loaded configuration
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Built-in engine presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Default thresholds and limits
    Default,
    /// Stricter grading, smaller inputs, shorter timeouts
    Strict,
    /// Larger chunks, larger inputs, longer timeouts
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<PresetArg> for termsguard_engine::EngineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => termsguard_engine::EngineConfig::default(),
            PresetArg::Strict => termsguard_engine::EngineConfig::strict(),
            PresetArg::Lenient => termsguard_engine::EngineConfig::lenient(),
        }
    }
}
