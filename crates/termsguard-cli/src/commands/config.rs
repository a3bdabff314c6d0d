//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `source` is the file the configuration was loaded from, if any.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    source: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let effective = match args.preset {
        Some(preset) => {
            eprintln!("{}", formatter.info(&format!("Built-in preset: {:?}", preset)));
            Config {
                settings: config.settings.clone(),
                engine: preset.into(),
            }
        }
        None => {
            let origin = match source {
                Some(path) => format!("Loaded from {}", path.display()),
                None => "Using built-in defaults".to_string(),
            };
            eprintln!("{}", formatter.info(&origin));
            config.clone()
        }
    };

    println!("{}", effective.to_toml()?);
    Ok(())
}
