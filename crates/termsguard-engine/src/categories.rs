//! User-rights category scores
//!
//! Clause keys are grouped into broad categories a reader cares about
//! (dispute resolution, data practices, billing...) and each category gets
//! its own length-normalized score from the document's summed clause counts.

use crate::scorer::NORM_FLOOR;
use crate::weights::WeightTable;
use std::collections::BTreeMap;
use termsguard_domain::{CategoryScore, ClauseCounts};

/// Bucket for weighted keys with no category mapping
pub const OTHER_CATEGORY: &str = "OTHER";

/// Floor on a category's normalized contribution
pub const CATEGORY_MIN_ADJUSTMENT: f64 = -30.0;

/// Ceiling on a category's normalized contribution
pub const CATEGORY_MAX_ADJUSTMENT: f64 = 10.0;

const BUILTIN_MAPPING: &[(&str, &str)] = &[
    ("ARBITRATION", "DISPUTE_RESOLUTION"),
    ("DELEGATION_ARBITRABILITY", "DISPUTE_RESOLUTION"),
    ("JURY_TRIAL_WAIVER", "DISPUTE_RESOLUTION"),
    ("ARBITRATION_CARVEOUTS", "DISPUTE_RESOLUTION"),
    ("CLASS_ACTION_WAIVER", "CLASS_ACTIONS"),
    ("UNILATERAL_CHANGES", "UNILATERAL_CHANGES"),
    ("DATA_SALE_OR_SHARING", "DATA_PRACTICES"),
    ("NO_DATA_SALE", "DATA_PRACTICES"),
    ("VAGUE_CONSENT", "DATA_PRACTICES"),
    ("LIMITED_RETENTION_DISCLOSURE", "DATA_PRACTICES"),
    ("TRANSPARENT_RETENTION", "DATA_PRACTICES"),
    ("AUTO_RENEWAL_FRICTION", "BILLING_AND_AUTORENEWAL"),
    ("NEGATIVE_OPTION_BILLING", "BILLING_AND_AUTORENEWAL"),
    ("MORAL_RIGHTS_WAIVER", "CONTENT_AND_IP"),
    ("LIABILITY_LIMITATION", "LIABILITY_AND_REMEDIES"),
    ("SELF_SERVICE_DELETION", "RETENTION_AND_DELETION"),
    ("CLEAR_OPT_OUT", "CONSENT_AND_OPT_OUT"),
];

/// Category scores for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryReport {
    /// Scores keyed by category name
    pub scores: BTreeMap<String, CategoryScore>,

    /// Clause keys with no category, in first-seen order
    pub unmapped_keys: Vec<String>,
}

/// Clause key to user-rights category mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    mapping: BTreeMap<String, String>,
}

impl CategoryMap {
    /// The built-in mapping
    pub fn builtin() -> Self {
        Self {
            mapping: BUILTIN_MAPPING
                .iter()
                .map(|(key, category)| (key.to_string(), category.to_string()))
                .collect(),
        }
    }

    /// Category for a clause key
    pub fn category_of(&self, key: &str) -> Option<&str> {
        self.mapping.get(key).map(String::as_str)
    }

    /// Score every category with at least one mapped key in `counts`
    pub fn score(
        &self,
        counts: &ClauseCounts,
        weights: &WeightTable,
        total_words: usize,
        per_n_words: usize,
    ) -> CategoryReport {
        let mut raw: BTreeMap<String, f64> = BTreeMap::new();
        let mut unmapped_keys: Vec<String> = Vec::new();

        for (category, key, count) in counts.iter() {
            let contribution = f64::from(count) * weights.weight(category, key);
            match self.category_of(key) {
                Some(name) => *raw.entry(name.to_string()).or_insert(0.0) += contribution,
                None => {
                    if weights.weight(category, key) != 0.0 {
                        *raw.entry(OTHER_CATEGORY.to_string()).or_insert(0.0) += contribution;
                    }
                    if !unmapped_keys.iter().any(|k| k == key) {
                        unmapped_keys.push(key.to_string());
                    }
                }
            }
        }

        let divisor = (total_words as f64 / per_n_words.max(1) as f64).max(NORM_FLOOR);
        let scores = raw
            .into_iter()
            .map(|(name, raw)| {
                let adjusted = raw / divisor;
                let bounded = adjusted.clamp(CATEGORY_MIN_ADJUSTMENT, CATEGORY_MAX_ADJUSTMENT);
                let score = (100.0 + bounded).clamp(0.0, 100.0);
                (name, CategoryScore { raw, adjusted, score })
            })
            .collect();

        CategoryReport {
            scores,
            unmapped_keys,
        }
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::builtin()
    }
}
