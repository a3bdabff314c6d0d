//! Weight table for clause scoring

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use termsguard_domain::Category;

/// Bounds on the total penalty and bonus a single chunk can receive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Caps {
    /// Floor for the normalized penalty (negative)
    pub max_negative: f64,

    /// Ceiling for the normalized bonus (positive)
    pub max_positive: f64,
}

impl Default for Caps {
    fn default() -> Self {
        Self {
            max_negative: -60.0,
            max_positive: 20.0,
        }
    }
}

/// Signed weight per `(category, key)`
///
/// Penalty categories hold negative weights and positives hold positive
/// ones. A catalog key without an entry weighs 0: it still counts as a
/// signal but does not move the score.
///
/// Deserialized tables are overrides: listed entries replace or extend the
/// built-in weights and everything else keeps its built-in value. A weight
/// of 0 switches a key off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WeightOverrides")]
pub struct WeightTable {
    /// Per-chunk contribution bounds
    pub caps: Caps,

    /// High-risk penalties
    #[serde(rename = "HIGH_RISK")]
    pub high_risk: BTreeMap<String, f64>,

    /// Medium-risk penalties
    #[serde(rename = "MEDIUM_RISK")]
    pub medium_risk: BTreeMap<String, f64>,

    /// Positive bonuses
    #[serde(rename = "POSITIVES")]
    pub positives: BTreeMap<String, f64>,
}

/// Serialized form of a weight table, applied on top of the built-in one
#[derive(Deserialize)]
struct WeightOverrides {
    #[serde(default)]
    caps: Option<Caps>,

    #[serde(rename = "HIGH_RISK", default)]
    high_risk: BTreeMap<String, f64>,

    #[serde(rename = "MEDIUM_RISK", default)]
    medium_risk: BTreeMap<String, f64>,

    #[serde(rename = "POSITIVES", default)]
    positives: BTreeMap<String, f64>,
}

impl From<WeightOverrides> for WeightTable {
    fn from(overrides: WeightOverrides) -> Self {
        let mut table = WeightTable::builtin();
        if let Some(caps) = overrides.caps {
            table.caps = caps;
        }
        table.high_risk.extend(overrides.high_risk);
        table.medium_risk.extend(overrides.medium_risk);
        table.positives.extend(overrides.positives);
        table
    }
}

impl WeightTable {
    /// An empty table with default caps
    pub fn empty() -> Self {
        Self {
            caps: Caps::default(),
            high_risk: BTreeMap::new(),
            medium_risk: BTreeMap::new(),
            positives: BTreeMap::new(),
        }
    }

    /// The built-in rubric weights
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (category, key, weight) in [
            (Category::HighRisk, "ARBITRATION", -15.0),
            (Category::HighRisk, "CLASS_ACTION_WAIVER", -15.0),
            (Category::HighRisk, "UNILATERAL_CHANGES", -12.0),
            (Category::HighRisk, "DATA_SALE_OR_SHARING", -10.0),
            (Category::HighRisk, "AUTO_RENEWAL_FRICTION", -8.0),
            (Category::HighRisk, "NEGATIVE_OPTION_BILLING", -8.0),
            (Category::HighRisk, "DELEGATION_ARBITRABILITY", -10.0),
            (Category::MediumRisk, "ARBITRATION_CARVEOUTS", -6.0),
            (Category::MediumRisk, "VAGUE_CONSENT", -5.0),
            (Category::MediumRisk, "LIMITED_RETENTION_DISCLOSURE", -5.0),
            (Category::MediumRisk, "MORAL_RIGHTS_WAIVER", -5.0),
            (Category::MediumRisk, "JURY_TRIAL_WAIVER", -6.0),
            (Category::Positives, "CLEAR_OPT_OUT", 5.0),
            (Category::Positives, "SELF_SERVICE_DELETION", 5.0),
            (Category::Positives, "NO_DATA_SALE", 6.0),
            (Category::Positives, "TRANSPARENT_RETENTION", 4.0),
        ] {
            table.set(category, key, weight);
        }
        table
    }

    fn category(&self, category: Category) -> &BTreeMap<String, f64> {
        match category {
            Category::HighRisk => &self.high_risk,
            Category::MediumRisk => &self.medium_risk,
            Category::Positives => &self.positives,
        }
    }

    /// Weight for a key, 0 if absent
    pub fn weight(&self, category: Category, key: &str) -> f64 {
        self.category(category).get(key).copied().unwrap_or(0.0)
    }

    /// Set or replace a weight
    pub fn set(&mut self, category: Category, key: &str, weight: f64) {
        let map = match category {
            Category::HighRisk => &mut self.high_risk,
            Category::MediumRisk => &mut self.medium_risk,
            Category::Positives => &mut self.positives,
        };
        map.insert(key.to_string(), weight);
    }

    /// Check weight signs and caps
    pub fn validate(&self) -> Result<(), String> {
        for category in Category::ALL {
            for (key, weight) in self.category(category) {
                if !weight.is_finite() {
                    return Err(format!("weight for {}.{} must be finite", category, key));
                }
                if category.is_penalty() && *weight > 0.0 {
                    return Err(format!("weight for {}.{} must not be positive", category, key));
                }
                if !category.is_penalty() && *weight < 0.0 {
                    return Err(format!("weight for {}.{} must not be negative", category, key));
                }
            }
        }
        if !(self.caps.max_negative.is_finite() && self.caps.max_negative <= 0.0) {
            return Err("caps.max_negative must be a finite value <= 0".to_string());
        }
        if !(self.caps.max_positive.is_finite() && self.caps.max_positive >= 0.0) {
            return Err("caps.max_positive must be a finite value >= 0".to_string());
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::builtin()
    }
}
