//! Configuration for the scoring engine

use crate::error::EngineError;
use crate::weights::WeightTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum score for each letter grade, evaluated top-down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeThresholds {
    /// Minimum score for an A
    pub a: f64,
    /// Minimum score for a B
    pub b: f64,
    /// Minimum score for a C
    pub c: f64,
    /// Minimum score for a D
    pub d: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a: 85.0,
            b: 75.0,
            c: 65.0,
            d: 50.0,
        }
    }
}

/// Blend weights for the confidence estimate; must sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// Weight of chunk coverage
    pub coverage: f64,
    /// Weight of signal density
    pub signal: f64,
    /// Weight of legal-document header detection
    pub doc_type: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            coverage: 0.4,
            signal: 0.4,
            doc_type: 0.2,
        }
    }
}

/// Configuration for the rights analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Target chunk size (characters)
    pub chunk_size: usize,

    /// Reference word count for length normalization
    pub per_n_words: usize,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Time budget for scanning all chunks of one document (milliseconds)
    pub scan_timeout_ms: u64,

    /// Time budget for one augmenter call or dictionary lookup (milliseconds)
    pub augment_timeout_ms: u64,

    /// Time budget for all dictionary lookups of one document (milliseconds)
    #[serde(default = "default_dictionary_timeout_ms")]
    pub dictionary_timeout_ms: u64,

    /// Maximum uncommon words reported
    pub max_uncommon_words: usize,

    /// Maximum dictionary terms reported
    pub max_dictionary_terms: usize,

    /// Words never looked up, in addition to the built-in common-word list
    #[serde(default)]
    pub extra_common_words: Vec<String>,

    /// Letter grade thresholds
    #[serde(default)]
    pub grading: GradeThresholds,

    /// Confidence blend weights
    #[serde(default)]
    pub confidence: ConfidenceWeights,

    /// Clause weights and caps
    #[serde(default)]
    pub weights: WeightTable,
}

impl EngineConfig {
    /// Get the scan budget as a Duration
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_timeout_ms)
    }

    /// Get the augmenter budget as a Duration
    pub fn augment_timeout(&self) -> Duration {
        Duration::from_millis(self.augment_timeout_ms)
    }

    /// Get the dictionary budget as a Duration
    pub fn dictionary_timeout(&self) -> Duration {
        Duration::from_millis(self.dictionary_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.per_n_words == 0 {
            return Err("per_n_words must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.chunk_size > self.max_text_length {
            return Err("chunk_size cannot exceed max_text_length".to_string());
        }
        if self.scan_timeout_ms == 0 {
            return Err("scan_timeout_ms must be greater than 0".to_string());
        }
        if self.augment_timeout_ms == 0 {
            return Err("augment_timeout_ms must be greater than 0".to_string());
        }
        if self.dictionary_timeout_ms == 0 {
            return Err("dictionary_timeout_ms must be greater than 0".to_string());
        }

        let g = &self.grading;
        let descending = g.a >= g.b && g.b >= g.c && g.c >= g.d;
        let in_range = [g.a, g.b, g.c, g.d].iter().all(|t| (0.0..=100.0).contains(t));
        if !descending || !in_range {
            return Err("grading thresholds must be within [0, 100] and satisfy a >= b >= c >= d".to_string());
        }

        let c = &self.confidence;
        if [c.coverage, c.signal, c.doc_type].iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err("confidence weights must be within [0, 1]".to_string());
        }
        if (c.coverage + c.signal + c.doc_type - 1.0).abs() > 1e-6 {
            return Err("confidence weights must sum to 1".to_string());
        }

        self.weights.validate()
    }
}

impl Default for EngineConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            chunk_size: 500,
            per_n_words: 1000,
            max_text_length: 1_000_000,
            scan_timeout_ms: 5_000,
            augment_timeout_ms: 2_000,
            dictionary_timeout_ms: default_dictionary_timeout_ms(),
            max_uncommon_words: 200,
            max_dictionary_terms: 40,
            extra_common_words: Vec::new(),
            grading: GradeThresholds::default(),
            confidence: ConfidenceWeights::default(),
            weights: WeightTable::builtin(),
        }
    }
}

impl EngineConfig {
    /// Strict preset: higher grade bars, tighter time budgets
    pub fn strict() -> Self {
        Self {
            max_text_length: 500_000,
            scan_timeout_ms: 2_000,
            augment_timeout_ms: 1_000,
            dictionary_timeout_ms: 2_000,
            grading: GradeThresholds {
                a: 90.0,
                b: 80.0,
                c: 70.0,
                d: 60.0,
            },
            ..Self::default()
        }
    }

    /// Lenient preset: larger inputs and longer budgets
    pub fn lenient() -> Self {
        Self {
            chunk_size: 1_000,
            max_text_length: 5_000_000,
            scan_timeout_ms: 30_000,
            augment_timeout_ms: 10_000,
            dictionary_timeout_ms: 30_000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate().map_err(EngineError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

fn default_dictionary_timeout_ms() -> u64 {
    5_000
}
