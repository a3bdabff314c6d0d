//! Confidence estimation
//!
//! Blends three heuristics into a 0-1 reliability estimate: how well the
//! chunks cover the document, how many clause signals were found, and
//! whether the text looks like a legal document at all.

use crate::config::ConfidenceWeights;
use regex::Regex;
use tracing::warn;

/// Clause hits at which the signal component saturates
pub const SIGNAL_SATURATION: f64 = 10.0;

/// A line starting with a typical legal-document heading word
const LEGAL_HEADER_PATTERN: &str =
    r"(?i)(?:^|\n)(?:terms|privacy|policy|agreement|notice|disclaimer|conditions)";

/// The individual confidence heuristics, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceComponents {
    /// Chunk coverage relative to document length
    pub coverage: f64,

    /// Clause signal density
    pub signal: f64,

    /// 1 if a legal-document header was found, else 0
    pub doc_type: f64,
}

/// Computes confidence from document totals
#[derive(Debug, Clone)]
pub struct ConfidenceEstimator {
    weights: ConfidenceWeights,
    per_n_words: usize,
    header: Option<Regex>,
}

impl ConfidenceEstimator {
    /// Create an estimator
    pub fn new(weights: ConfidenceWeights, per_n_words: usize) -> Self {
        let header = match Regex::new(LEGAL_HEADER_PATTERN) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(error = %e, "Legal header detection disabled");
                None
            }
        };
        Self {
            weights,
            per_n_words: per_n_words.max(1),
            header,
        }
    }

    /// Compute each heuristic
    pub fn components(
        &self,
        text: &str,
        chunk_count: usize,
        total_words: usize,
        total_signals: u64,
    ) -> ConfidenceComponents {
        let expected_chunks = total_words.div_ceil(self.per_n_words).max(1);
        let coverage = (chunk_count as f64 / expected_chunks as f64).min(1.0);
        let signal = (total_signals as f64 / SIGNAL_SATURATION).min(1.0);
        let doc_type = match &self.header {
            Some(header) if header.is_match(text) => 1.0,
            _ => 0.0,
        };
        ConfidenceComponents {
            coverage,
            signal,
            doc_type,
        }
    }

    /// Weighted blend, clamped to [0, 1] and rounded to two decimals
    pub fn estimate(
        &self,
        text: &str,
        chunk_count: usize,
        total_words: usize,
        total_signals: u64,
    ) -> f64 {
        let c = self.components(text, chunk_count, total_words, total_signals);
        let blended = self.weights.coverage * c.coverage
            + self.weights.signal * c.signal
            + self.weights.doc_type * c.doc_type;
        (blended.clamp(0.0, 1.0) * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> ConfidenceEstimator {
        ConfidenceEstimator::new(ConfidenceWeights::default(), 1000)
    }

    #[test]
    fn test_short_plain_text() {
        // One chunk for under 1000 words is full coverage; no signals, no header
        let confidence = estimator().estimate("Welcome to our website.", 1, 4, 0);
        assert_eq!(confidence, 0.4);
    }

    #[test]
    fn test_header_detected_at_line_start() {
        let est = estimator();
        let c = est.components("Intro\nPrivacy Policy\nWe collect data.", 1, 7, 0);
        assert_eq!(c.doc_type, 1.0);

        let c = est.components("Read our privacy policy.", 1, 4, 0);
        assert_eq!(c.doc_type, 0.0);

        let c = est.components("TERMS OF SERVICE", 1, 3, 0);
        assert_eq!(c.doc_type, 1.0);
    }

    #[test]
    fn test_signal_saturates() {
        let est = estimator();
        assert_eq!(est.components("", 1, 1, 5).signal, 0.5);
        assert_eq!(est.components("", 1, 1, 25).signal, 1.0);
    }

    #[test]
    fn test_coverage_for_long_document() {
        let est = estimator();
        // 2500 words expects 3 chunks
        assert!((est.components("", 2, 2500, 0).coverage - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(est.components("", 12, 2500, 0).coverage, 1.0);
    }

    #[test]
    fn test_full_confidence() {
        let confidence = estimator().estimate("Terms of Service", 1, 3, 10);
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let confidence = estimator().estimate("", 1, 1, 3);
        assert_eq!(confidence, 0.52);
    }
}
