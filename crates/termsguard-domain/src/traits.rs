//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the scoring engine and the
//! services it can optionally consult. Both are async because their real
//! implementations do I/O; the engine isolates every call so a failing
//! collaborator never aborts an analysis.

use crate::{Category, ClauseCounts};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors an augmenter may report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AugmentError {
    /// The model could not be loaded or queried
    #[error("Model error: {0}")]
    Model(String),

    /// The augmenter is temporarily unavailable
    #[error("Augmenter unavailable: {0}")]
    Unavailable(String),
}

/// Errors a definition lookup may report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The dictionary backend could not be reached
    #[error("Dictionary unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something unusable
    #[error("Dictionary backend error: {0}")]
    Backend(String),
}

/// One category signal reported by an ML classifier
///
/// Deserializes from either a bare probability (`0.8`) or an object carrying
/// a reader-friendly score (`{"score": 35}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MlSignal {
    /// Probability of risk in [0, 1]
    Probability(f64),

    /// Score already in reader-friendly polarity
    Score {
        /// Score in [0, 100] (values in [0, 1] are read as fractions)
        score: f64,
    },
}

impl MlSignal {
    /// Probability of risk, clamped to [0, 1]
    pub fn probability(&self) -> f64 {
        match *self {
            MlSignal::Probability(p) => clamp_unit(p),
            MlSignal::Score { .. } => clamp_unit(1.0 - self.score() / 100.0),
        }
    }

    /// Reader-friendly score in [0, 100]
    ///
    /// Supplied scores pass through, except that values in [0, 1] are read
    /// as fractions and scaled up.
    pub fn score(&self) -> f64 {
        match *self {
            MlSignal::Probability(_) => 100.0 - self.probability() * 100.0,
            MlSignal::Score { score } if score.is_nan() => 50.0,
            MlSignal::Score { score } if score <= 1.0 => score.max(0.0) * 100.0,
            MlSignal::Score { score } => score.min(100.0),
        }
    }

    /// Whether the classifier produced a usable number
    pub fn is_finite(&self) -> bool {
        match *self {
            MlSignal::Probability(p) => p.is_finite(),
            MlSignal::Score { score } => score.is_finite(),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// What an augmenter contributes to one chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Augmentation {
    /// Extra clause occurrences, added to the chunk's rule-based counts
    pub clause_counts: ClauseCounts,

    /// Category signals, keyed by user-rights category name
    pub ml_category_scores: BTreeMap<String, MlSignal>,
}

impl Augmentation {
    /// An augmentation that changes nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Add clause occurrences
    pub fn with_count(mut self, category: Category, key: &str, by: u32) -> Self {
        self.clause_counts.add(category, key, by);
        self
    }

    /// Attach a category signal
    pub fn with_category_signal(mut self, category: impl Into<String>, signal: MlSignal) -> Self {
        self.ml_category_scores.insert(category.into(), signal);
        self
    }

    /// Whether the augmentation carries anything
    pub fn is_empty(&self) -> bool {
        self.clause_counts.total() == 0 && self.ml_category_scores.is_empty()
    }
}

/// Optional ML hook run on every chunk after pattern matching
///
/// Implemented outside the engine (a sentence classifier, a remote model).
#[async_trait]
pub trait ClauseAugmenter: Send + Sync {
    /// Inspect a chunk and its rule-based counts, returning extra signals
    async fn augment(&self, chunk: &str, counts: &ClauseCounts) -> Result<Augmentation, AugmentError>;
}

/// Legal dictionary lookup
///
/// Implemented by an external dictionary service; the engine ships an
/// in-memory glossary.
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    /// Definition for a lowercased word, `None` if unknown
    async fn definition(&self, word: &str) -> Result<Option<String>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_signal_polarity() {
        let signal = MlSignal::Probability(0.8);
        assert!((signal.probability() - 0.8).abs() < 1e-9);
        assert!((signal.score() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_signal_passes_through() {
        let signal = MlSignal::Score { score: 35.0 };
        assert_eq!(signal.score(), 35.0);
        assert!((signal.probability() - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_score_uses_one_scale() {
        let signal = MlSignal::Score { score: 0.5 };
        assert_eq!(signal.score(), 50.0);
        assert!((signal.probability() - 0.5).abs() < 1e-9);

        let signal = MlSignal::Score { score: 0.2 };
        assert!((signal.score() - 20.0).abs() < 1e-9);
        assert!((signal.probability() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(MlSignal::Score { score: 140.0 }.score(), 100.0);
        assert_eq!(MlSignal::Score { score: -3.0 }.score(), 0.0);
        assert_eq!(MlSignal::Score { score: -3.0 }.probability(), 1.0);
    }

    #[test]
    fn test_nan_signals_are_not_finite() {
        let signal = MlSignal::Score { score: f64::NAN };
        assert!(!signal.is_finite());
        assert_eq!(signal.score(), 50.0);
        assert!(!MlSignal::Probability(f64::NAN).is_finite());
        assert!(MlSignal::Probability(0.3).is_finite());
    }

    #[test]
    fn test_signal_deserializes_both_shapes() {
        let map: BTreeMap<String, MlSignal> =
            serde_json::from_str(r#"{"DISPUTE_RESOLUTION": 0.8, "DATA_PRACTICES": {"score": 35}}"#).unwrap();
        assert_eq!(map["DISPUTE_RESOLUTION"], MlSignal::Probability(0.8));
        assert_eq!(map["DATA_PRACTICES"], MlSignal::Score { score: 35.0 });
    }

    #[test]
    fn test_out_of_range_probability_is_clamped() {
        assert_eq!(MlSignal::Probability(1.7).probability(), 1.0);
        assert_eq!(MlSignal::Probability(f64::NAN).probability(), 0.5);
    }

    #[test]
    fn test_augmentation_builder() {
        let augmentation = Augmentation::none()
            .with_count(Category::HighRisk, "ARBITRATION", 1)
            .with_category_signal("DISPUTE_RESOLUTION", MlSignal::Probability(0.9));
        assert!(!augmentation.is_empty());
        assert_eq!(augmentation.clause_counts.get(Category::HighRisk, "ARBITRATION"), 1);
        assert!(Augmentation::none().is_empty());
    }
}
