//! Analysis results
//!
//! [`DocumentAnalysis`] is the JSON contract consumed by summarization,
//! reporting and caching layers. It contains only owned, acyclic data so it
//! always serializes cleanly.

use crate::traits::MlSignal;
use crate::{ClauseCounts, Grade};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Scored result for a single chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkAnalysis {
    /// Whitespace-separated words in the chunk (never below 1)
    pub word_count: usize,

    /// Complete clause counts for the chunk
    pub clause_counts: ClauseCounts,

    /// Weighted penalty sum before normalization (<= 0)
    pub raw_neg: f64,

    /// Weighted bonus sum before normalization (>= 0)
    pub raw_pos: f64,

    /// Penalty after length normalization
    pub adjusted_neg: f64,

    /// Bonus after length normalization
    pub adjusted_pos: f64,

    /// Penalty after applying the negative cap
    pub capped_neg: f64,

    /// Bonus after applying the positive cap
    pub capped_pos: f64,

    /// Chunk score in [0, 100]
    pub score: f64,

    /// Category signals attached by an augmenter, if any
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ml_signals: BTreeMap<String, MlSignal>,
}

/// A word the dictionary collaborator could define
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncommonWord {
    /// Lowercased word
    pub word: String,

    /// Definition text
    pub definition: String,
}

/// Occurrences of a defined legal term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryTerm {
    /// Lowercased term
    pub word: String,

    /// Number of occurrences in the document
    pub count: u32,

    /// Definition text
    pub definition: String,
}

/// Rule-based score for one user-rights category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Weighted contribution before normalization
    pub raw: f64,

    /// Contribution after length normalization
    pub adjusted: f64,

    /// Category score in [0, 100]
    pub score: f64,
}

/// Document-level summary of ML category signals
///
/// `score` uses the same polarity as rule-based scores (higher is better for
/// the reader); `probability` is the probability of risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlCategoryScore {
    /// Number of chunks that reported this category
    pub observations: u32,

    /// Mean probability of risk in [0, 1]
    pub probability: f64,

    /// Mean reader-friendly score in [0, 100]
    pub score: f64,
}

/// Diagnostic details attached to a document analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    /// Number of chunks scored
    pub chunk_count: usize,

    /// Unweighted mean of chunk scores
    pub average_score: f64,

    /// Total clause hits across every chunk and category
    pub clause_signals: u64,

    /// Total words across every chunk
    pub word_count: usize,

    /// Clause counts summed across chunks
    pub clause_counts: ClauseCounts,

    /// Defined legal terms with occurrence counts
    #[serde(default)]
    pub dictionary_terms: Vec<DictionaryTerm>,

    /// Per user-rights category scores
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_scores: BTreeMap<String, CategoryScore>,

    /// Clause keys with no user-rights category mapping
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped_clause_keys: Vec<String>,

    /// ML category signals, present only when an augmenter supplied some
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_category_scores: Option<BTreeMap<String, MlCategoryScore>>,

    /// Cause of a degraded result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated analysis of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    /// Rights score in [0, 100]
    pub rights_score: f64,

    /// Letter grade for the rights score
    pub grade: Grade,

    /// Reliability estimate in [0, 1], two decimals
    pub confidence: f64,

    /// Words the dictionary collaborator could define
    #[serde(default)]
    pub uncommon_words: Vec<UncommonWord>,

    /// Diagnostic details
    pub details: AnalysisDetails,
}

/// Why an analysis fell back to a default result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegradedReason {
    /// Pattern scanning exceeded its time budget
    #[error("Scan exceeded time budget of {0:?}")]
    ScanTimeout(Duration),

    /// The scan task failed before producing a result
    #[error("Scan failed: {0}")]
    ScanFailed(String),

    /// Input longer than the configured maximum
    #[error("Text too long: {len} chars (max: {max})")]
    TextTooLong {
        /// Input length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Result of analyzing a document
///
/// Analysis never fails outright. A degraded outcome still carries a readable
/// score and grade, but callers can tell it apart from a genuinely neutral
/// document.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Full analysis
    Complete(DocumentAnalysis),

    /// Default analysis standing in for a failed one
    Degraded {
        /// Default analysis with `details.error` set
        analysis: DocumentAnalysis,
        /// Cause of the fallback
        reason: DegradedReason,
    },
}

impl AnalysisOutcome {
    /// Borrow the analysis regardless of outcome
    pub fn analysis(&self) -> &DocumentAnalysis {
        match self {
            AnalysisOutcome::Complete(analysis) => analysis,
            AnalysisOutcome::Degraded { analysis, .. } => analysis,
        }
    }

    /// Take the analysis regardless of outcome
    pub fn into_analysis(self) -> DocumentAnalysis {
        match self {
            AnalysisOutcome::Complete(analysis) => analysis,
            AnalysisOutcome::Degraded { analysis, .. } => analysis,
        }
    }

    /// Whether this outcome is a fallback
    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisOutcome::Degraded { .. })
    }

    /// Cause of the fallback, if any
    pub fn reason(&self) -> Option<&DegradedReason> {
        match self {
            AnalysisOutcome::Complete(_) => None,
            AnalysisOutcome::Degraded { reason, .. } => Some(reason),
        }
    }
}
