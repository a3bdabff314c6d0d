//! Document-level aggregation of chunk results
//!
//! Every accumulator here is a sum or a count, so chunks can be folded in any
//! order, and partial totals built on separate tasks can be merged.

use std::collections::BTreeMap;
use termsguard_domain::{ChunkAnalysis, ClauseCounts, MlCategoryScore, MlSignal};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MlAccumulator {
    observations: u32,
    probability_sum: f64,
    score_sum: f64,
}

impl MlAccumulator {
    fn observe(&mut self, signal: &MlSignal) {
        self.observations = self.observations.saturating_add(1);
        self.probability_sum += signal.probability();
        self.score_sum += signal.score();
    }

    fn merge(&mut self, other: &MlAccumulator) {
        self.observations = self.observations.saturating_add(other.observations);
        self.probability_sum += other.probability_sum;
        self.score_sum += other.score_sum;
    }

    fn summary(&self) -> MlCategoryScore {
        let n = f64::from(self.observations.max(1));
        MlCategoryScore {
            observations: self.observations,
            probability: self.probability_sum / n,
            score: self.score_sum / n,
        }
    }
}

/// Running totals across the chunks of one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTotals {
    /// Chunks folded in
    pub chunk_count: usize,

    /// Sum of chunk scores
    pub total_score: f64,

    /// Sum of chunk word counts
    pub total_words: usize,

    /// Sum of every clause count in every category
    pub total_signals: u64,

    /// Per-key summed clause counts
    pub clause_counts: ClauseCounts,

    ml: BTreeMap<String, MlAccumulator>,
}

impl DocumentTotals {
    /// Empty totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a set of chunk results
    pub fn from_chunks<'a>(chunks: impl IntoIterator<Item = &'a ChunkAnalysis>) -> Self {
        let mut totals = Self::new();
        for chunk in chunks {
            totals.add_chunk(chunk);
        }
        totals
    }

    /// Fold one chunk result into the totals
    pub fn add_chunk(&mut self, chunk: &ChunkAnalysis) {
        self.chunk_count += 1;
        self.total_score += chunk.score;
        self.total_words += chunk.word_count;
        self.total_signals += chunk.clause_counts.total();
        self.clause_counts.merge(&chunk.clause_counts);
        for (category, signal) in &chunk.ml_signals {
            if !signal.is_finite() {
                debug!(category = %category, "Skipping non-finite ML signal");
                continue;
            }
            self.ml.entry(category.clone()).or_default().observe(signal);
        }
    }

    /// Combine two partial totals
    pub fn merge(&mut self, other: &DocumentTotals) {
        self.chunk_count += other.chunk_count;
        self.total_score += other.total_score;
        self.total_words += other.total_words;
        self.total_signals += other.total_signals;
        self.clause_counts.merge(&other.clause_counts);
        for (category, acc) in &other.ml {
            self.ml.entry(category.clone()).or_default().merge(acc);
        }
    }

    /// Unweighted mean of chunk scores
    pub fn average_score(&self) -> f64 {
        self.total_score / self.chunk_count.max(1) as f64
    }

    /// Per-category means of ML signals, `None` if no chunk carried any
    pub fn ml_category_scores(&self) -> Option<BTreeMap<String, MlCategoryScore>> {
        if self.ml.is_empty() {
            return None;
        }
        Some(
            self.ml
                .iter()
                .map(|(category, acc)| (category.clone(), acc.summary()))
                .collect(),
        )
    }
}
