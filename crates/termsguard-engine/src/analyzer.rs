//! Document analysis pipeline
//!
//! text → chunks → {pattern scan → chunk score → augmented counts} → totals →
//! category scores, confidence, grade and dictionary terms.

use crate::aggregate::DocumentTotals;
use crate::augment::AugmentRunner;
use crate::catalog::Catalog;
use crate::categories::CategoryMap;
use crate::chunking::TextChunker;
use crate::confidence::ConfidenceEstimator;
use crate::config::EngineConfig;
use crate::dictionary::{TermScanner, TermScannerConfig};
use crate::error::EngineError;
use crate::grade::grade_for;
use crate::matcher::PatternEngine;
use crate::scorer::{count_words, ChunkScorer};
use crate::weights::WeightTable;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use termsguard_domain::{
    AnalysisDetails, AnalysisOutcome, ChunkAnalysis, ClauseAugmenter, ClauseCounts,
    DefinitionLookup, DegradedReason, DocumentAnalysis,
};
use tracing::{debug, info, warn};

/// Rights score reported when an analysis falls back to a default result
pub const DEGRADED_SCORE: f64 = 50.0;

/// Compiled catalog and the weights it is scored with, swapped together
#[derive(Debug)]
struct ScoringState {
    engine: PatternEngine,
    weights: WeightTable,
}

/// Pattern counts and word count for one chunk
type ChunkScan = (ClauseCounts, usize);

/// Scores Terms of Service and privacy policy documents
///
/// Built once at startup and shared. The compiled catalog is immutable;
/// [`RightsAnalyzer::rebuild`] swaps in a new one without disturbing
/// analyses already in flight.
pub struct RightsAnalyzer {
    config: EngineConfig,
    state: RwLock<Arc<ScoringState>>,
    chunker: TextChunker,
    confidence: ConfidenceEstimator,
    categories: CategoryMap,
    augment: AugmentRunner,
    terms: TermScanner,
}

impl RightsAnalyzer {
    /// Create an analyzer over the built-in catalog
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_catalog(config, Catalog::builtin())
    }

    /// Create an analyzer over a custom catalog
    ///
    /// Fails if the configuration is invalid or any pattern does not compile.
    pub fn with_catalog(config: EngineConfig, catalog: Catalog) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        let engine = PatternEngine::new(catalog)?;

        let state = ScoringState {
            engine,
            weights: config.weights.clone(),
        };
        let terms = TermScanner::new(None, term_config(&config));

        Ok(Self {
            chunker: TextChunker::new(config.chunk_size),
            confidence: ConfidenceEstimator::new(config.confidence, config.per_n_words),
            categories: CategoryMap::builtin(),
            augment: AugmentRunner::new(None, config.augment_timeout()),
            terms,
            state: RwLock::new(Arc::new(state)),
            config,
        })
    }

    /// Attach an ML augmenter
    pub fn with_augmenter(mut self, augmenter: Arc<dyn ClauseAugmenter>) -> Self {
        self.augment = AugmentRunner::new(Some(augmenter), self.config.augment_timeout());
        self
    }

    /// Attach a dictionary for uncommon words and legal terms
    pub fn with_dictionary(mut self, lookup: Arc<dyn DefinitionLookup>) -> Self {
        self.terms = TermScanner::new(Some(lookup), term_config(&self.config));
        self
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Catalog currently in use
    pub fn catalog(&self) -> Catalog {
        self.state().engine.catalog().clone()
    }

    /// Weights currently in use
    pub fn weights(&self) -> WeightTable {
        self.state().weights.clone()
    }

    /// Recompile the catalog and replace the weights
    ///
    /// On error the previous state stays in place.
    pub fn rebuild(&self, catalog: Catalog, weights: WeightTable) -> Result<(), EngineError> {
        weights.validate().map_err(EngineError::Config)?;
        let engine = PatternEngine::new(catalog)?;
        let patterns = engine.catalog().len();

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = Arc::new(ScoringState { engine, weights });
        info!(patterns, "Rebuilt scoring state");
        Ok(())
    }

    fn state(&self) -> Arc<ScoringState> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&state)
    }

    /// Analyze a document
    ///
    /// Never fails: scan timeouts, scan task failures and oversized input
    /// produce [`AnalysisOutcome::Degraded`] with a default score.
    pub async fn analyze(&self, text: &str) -> AnalysisOutcome {
        self.analyze_within(text, self.config.scan_timeout()).await
    }

    async fn analyze_within(&self, text: &str, scan_budget: Duration) -> AnalysisOutcome {
        let state = self.state();
        let len = text.chars().count();
        info!(chars = len, "Starting rights analysis");

        if len > self.config.max_text_length {
            return self.degraded(
                &state,
                DegradedReason::TextTooLong {
                    len,
                    max: self.config.max_text_length,
                },
            );
        }

        let chunks = self.chunker.chunk(text);
        let (chunks, scans) = match scan(&state, chunks, scan_budget).await {
            Ok(scanned) => scanned,
            Err(reason) => return self.degraded(&state, reason),
        };

        let counts: Vec<ClauseCounts> = scans.iter().map(|(counts, _)| counts.clone()).collect();
        let augmentations = self.augment.run(&chunks, &counts).await;

        let scorer = ChunkScorer::new(&state.weights, self.config.per_n_words);
        let analyses: Vec<ChunkAnalysis> = scans
            .into_iter()
            .zip(augmentations)
            .map(|((counts, words), augmentation)| {
                // Chunk scores come from rule matches only; augmented counts
                // feed totals, signals and category scores.
                let mut analysis = scorer.score(words, counts);
                analysis.clause_counts.merge(&augmentation.clause_counts);
                analysis.ml_signals = augmentation.ml_category_scores;
                debug!(score = analysis.score, words, "Chunk analysis");
                analysis
            })
            .collect();

        let totals = DocumentTotals::from_chunks(&analyses);
        let rights_score = totals.average_score();
        let categories = self.categories.score(
            &totals.clause_counts,
            &state.weights,
            totals.total_words,
            self.config.per_n_words,
        );
        let confidence = self.confidence.estimate(
            text,
            totals.chunk_count,
            totals.total_words,
            totals.total_signals,
        );
        let grade = grade_for(rights_score, &self.config.grading);
        let terms = self.terms.scan(text).await;

        let analysis = DocumentAnalysis {
            rights_score,
            grade,
            confidence,
            uncommon_words: terms.uncommon_words,
            details: AnalysisDetails {
                chunk_count: totals.chunk_count,
                average_score: rights_score,
                clause_signals: totals.total_signals,
                word_count: totals.total_words,
                ml_category_scores: totals.ml_category_scores(),
                clause_counts: totals.clause_counts,
                dictionary_terms: terms.dictionary_terms,
                category_scores: categories.scores,
                unmapped_clause_keys: categories.unmapped_keys,
                error: None,
            },
        };

        info!(
            score = analysis.rights_score,
            grade = %analysis.grade,
            confidence = analysis.confidence,
            chunks = analysis.details.chunk_count,
            signals = analysis.details.clause_signals,
            "Analysis complete"
        );
        AnalysisOutcome::Complete(analysis)
    }

    fn degraded(&self, state: &ScoringState, reason: DegradedReason) -> AnalysisOutcome {
        warn!(reason = %reason, "Analysis degraded, returning default result");
        let analysis = DocumentAnalysis {
            rights_score: DEGRADED_SCORE,
            grade: grade_for(DEGRADED_SCORE, &self.config.grading),
            confidence: 0.0,
            uncommon_words: Vec::new(),
            details: AnalysisDetails {
                average_score: DEGRADED_SCORE,
                clause_counts: state.engine.catalog().empty_counts(),
                error: Some(reason.to_string()),
                ..AnalysisDetails::default()
            },
        };
        AnalysisOutcome::Degraded { analysis, reason }
    }
}

/// Scan every chunk on a blocking task within the scan budget
async fn scan(
    state: &Arc<ScoringState>,
    chunks: Vec<String>,
    budget: Duration,
) -> Result<(Vec<String>, Vec<ChunkScan>), DegradedReason> {
    let deadline = Instant::now() + budget;
    let state = Arc::clone(state);

    let task = tokio::task::spawn_blocking(move || -> Result<_, ()> {
        let scans = scan_chunks(&state.engine, &chunks, deadline)?;
        Ok((chunks, scans))
    });

    match tokio::time::timeout(budget, task).await {
        Ok(Ok(Ok(scanned))) => Ok(scanned),
        Ok(Ok(Err(()))) => Err(DegradedReason::ScanTimeout(budget)),
        Ok(Err(e)) => Err(DegradedReason::ScanFailed(e.to_string())),
        Err(_) => Err(DegradedReason::ScanTimeout(budget)),
    }
}

/// Count clauses and words per chunk; `Err` once the deadline has passed
fn scan_chunks(
    engine: &PatternEngine,
    chunks: &[String],
    deadline: Instant,
) -> Result<Vec<ChunkScan>, ()> {
    let mut scans = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if Instant::now() >= deadline {
            return Err(());
        }
        scans.push((engine.count_clauses(chunk), count_words(chunk)));
    }
    Ok(scans)
}

fn term_config(config: &EngineConfig) -> TermScannerConfig {
    TermScannerConfig {
        max_uncommon_words: config.max_uncommon_words,
        max_dictionary_terms: config.max_dictionary_terms,
        lookup_timeout: config.augment_timeout(),
        scan_budget: config.dictionary_timeout(),
        extra_common_words: config.extra_common_words.clone(),
    }
}
