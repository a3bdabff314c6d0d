//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Read;
use std::sync::Arc;
use termsguard_domain::AnalysisOutcome;
use termsguard_engine::{RightsAnalyzer, StaticGlossary};
use tracing::{debug, info};

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_document(&args)?;
    let outcome = analyze_text(&text, config).await?;
    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(())
}

/// Read the document named by the arguments.
pub fn read_document(args: &AnalyzeArgs) -> Result<String> {
    if args.stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        debug!(chars = text.len(), "Read document from stdin");
        return Ok(text);
    }

    match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            debug!(path = %path.display(), chars = text.len(), "Read document");
            Ok(text)
        }
        None => Err(CliError::InvalidInput(
            "Provide a FILE to analyze or pass --stdin".to_string(),
        )),
    }
}

/// Build an analyzer from the configuration and analyze `text`.
pub async fn analyze_text(text: &str, config: &Config) -> Result<AnalysisOutcome> {
    let mut analyzer = RightsAnalyzer::new(config.engine.clone())?;
    if config.settings.glossary {
        analyzer = analyzer.with_dictionary(Arc::new(StaticGlossary::builtin()));
    }

    let outcome = analyzer.analyze(text).await;
    let analysis = outcome.analysis();
    info!(
        score = analysis.rights_score,
        grade = %analysis.grade,
        degraded = outcome.is_degraded(),
        "Analysis finished"
    );
    Ok(outcome)
}
