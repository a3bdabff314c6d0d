//! Error types for the scoring engine
//!
//! Only engine construction can fail. Analysis itself recovers locally and
//! reports fallbacks through `AnalysisOutcome::Degraded`.

use termsguard_domain::Category;
use thiserror::Error;

/// Errors that can occur while building the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// A catalog fragment (or the combined alternation) failed to compile
    #[error("Pattern compilation failed for {key}: {message}")]
    PatternCompilation {
        /// Offending pattern as `CATEGORY__KEY`, or `catalog` for the alternation
        key: String,
        /// Compiler message
        message: String,
    },

    /// Two patterns share a key within one category
    #[error("Duplicate pattern key {key} in {category}")]
    DuplicatePattern {
        /// Category holding both patterns
        category: Category,
        /// Repeated key
        key: String,
    },

    /// Pattern key is not usable as a capture group name
    #[error("Invalid pattern key '{0}': expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Toml(e.to_string())
    }
}
