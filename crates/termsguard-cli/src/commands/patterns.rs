//! Patterns command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use termsguard_engine::Catalog;

/// Execute the patterns command.
pub async fn execute_patterns(config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog = Catalog::builtin();
    println!("{}", formatter.format_patterns(&catalog, &config.engine.weights)?);
    Ok(())
}
