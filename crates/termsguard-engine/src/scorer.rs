//! Per-chunk scoring
//!
//! Weighted clause counts are normalized by chunk length, capped and turned
//! into a 0-100 score. The arithmetic is pure and never produces NaN: word
//! counts are floored at 1 and the normalization divisor at [`NORM_FLOOR`].

use crate::weights::WeightTable;
use std::collections::BTreeMap;
use termsguard_domain::{Category, ChunkAnalysis, ClauseCounts};

/// Score of a chunk with no weighted signal
pub const NEUTRAL_BASELINE_SCORE: f64 = 80.0;

/// Lower bound on the length normalization divisor
pub const NORM_FLOOR: f64 = 1.0;

/// Whitespace-separated words, never below 1
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

/// Scores chunks against a weight table
#[derive(Debug, Clone, Copy)]
pub struct ChunkScorer<'a> {
    weights: &'a WeightTable,
    per_n_words: usize,
}

impl<'a> ChunkScorer<'a> {
    /// Create a scorer normalizing to `per_n_words`
    pub fn new(weights: &'a WeightTable, per_n_words: usize) -> Self {
        Self {
            weights,
            per_n_words: per_n_words.max(1),
        }
    }

    /// Score one chunk from its clause counts
    pub fn score(&self, word_count: usize, clause_counts: ClauseCounts) -> ChunkAnalysis {
        let word_count = word_count.max(1);
        let (raw_neg, raw_pos) = self.weighted_sums(&clause_counts);

        let divisor = self.divisor(word_count);
        let adjusted_neg = raw_neg / divisor;
        let adjusted_pos = raw_pos / divisor;

        let (capped_neg, capped_pos, score) = if raw_neg == 0.0 && raw_pos == 0.0 {
            (0.0, 0.0, NEUTRAL_BASELINE_SCORE)
        } else {
            let capped_neg = adjusted_neg.max(self.weights.caps.max_negative);
            let capped_pos = adjusted_pos.min(self.weights.caps.max_positive);
            (capped_neg, capped_pos, (100.0 + capped_neg + capped_pos).clamp(0.0, 100.0))
        };

        ChunkAnalysis {
            word_count,
            clause_counts,
            raw_neg,
            raw_pos,
            adjusted_neg,
            adjusted_pos,
            capped_neg,
            capped_pos,
            score,
            ml_signals: BTreeMap::new(),
        }
    }

    /// Length normalization divisor for a span of `word_count` words
    pub fn divisor(&self, word_count: usize) -> f64 {
        (word_count as f64 / self.per_n_words as f64).max(NORM_FLOOR)
    }

    /// Penalty and bonus sums: `(neg <= 0, pos >= 0)`
    fn weighted_sums(&self, counts: &ClauseCounts) -> (f64, f64) {
        let mut neg = 0.0;
        let mut pos = 0.0;
        for (category, key, count) in counts.iter() {
            if count == 0 {
                continue;
            }
            let contribution = f64::from(count) * self.weights.weight(category, key);
            match category {
                Category::HighRisk | Category::MediumRisk => neg += contribution,
                Category::Positives => pos += contribution,
            }
        }
        (neg, pos)
    }
}
