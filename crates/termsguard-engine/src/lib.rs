//! Termsguard Engine
//!
//! Clause-pattern risk scoring for Terms of Service and privacy policies.
//!
//! # Overview
//!
//! The engine scans document text for legally significant clauses
//! (arbitration, class-action waivers, data sale, opt-out procedures...),
//! weighs them by risk category and turns them into a length-normalized
//! 0-100 rights score, a letter grade and a confidence estimate. Output is
//! deterministic for a given catalog and weight table.
//!
//! # Architecture
//!
//! ```text
//! text → TextChunker → PatternEngine (one scan per chunk) → ClauseAugmenter?
//!      → ChunkScorer → DocumentTotals → categories / confidence / grade
//!      → DocumentAnalysis
//! ```
//!
//! # Key Features
//!
//! - **Single-pass matching**: the whole catalog is one alternation with named groups
//! - **Length normalization**: long documents are not penalized for repetition alone
//! - **Bounded scanning**: scans run off the async runtime under a time budget
//! - **Optional collaborators**: ML augmenter and dictionary lookup are isolated;
//!   their failures never fail an analysis
//! - **Explicit degradation**: fallbacks are reported as `AnalysisOutcome::Degraded`
//!
//! # Example Usage
//!
//! ```no_run
//! use termsguard_engine::{EngineConfig, RightsAnalyzer, StaticGlossary};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = RightsAnalyzer::new(EngineConfig::default())?
//!     .with_dictionary(Arc::new(StaticGlossary::builtin()));
//!
//! let outcome = analyzer
//!     .analyze("You agree to binding arbitration for all disputes.")
//!     .await;
//!
//! let analysis = outcome.analysis();
//! println!("Score: {:.1} ({})", analysis.rights_score, analysis.grade);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod analyzer;
mod augment;
mod catalog;
mod categories;
mod chunking;
mod confidence;
mod config;
mod dictionary;
mod error;
mod grade;
mod matcher;
mod scorer;
mod weights;

#[cfg(test)]
mod tests;

pub use aggregate::DocumentTotals;
pub use analyzer::{RightsAnalyzer, DEGRADED_SCORE};
pub use augment::AugmentRunner;
pub use catalog::{Catalog, ClausePattern};
pub use categories::{
    CategoryMap, CategoryReport, CATEGORY_MAX_ADJUSTMENT, CATEGORY_MIN_ADJUSTMENT, OTHER_CATEGORY,
};
pub use chunking::TextChunker;
pub use confidence::{ConfidenceComponents, ConfidenceEstimator, SIGNAL_SATURATION};
pub use config::{ConfidenceWeights, EngineConfig, GradeThresholds};
pub use dictionary::{StaticGlossary, TermReport, TermScanner, TermScannerConfig, COMMON_WORDS};
pub use error::EngineError;
pub use grade::grade_for;
pub use matcher::PatternEngine;
pub use scorer::{count_words, ChunkScorer, NEUTRAL_BASELINE_SCORE, NORM_FLOOR};
pub use weights::{Caps, WeightTable};
