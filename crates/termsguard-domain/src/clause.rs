//! Clause count tables

use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category, per-key clause occurrence counts
///
/// Produced for every chunk by the pattern matcher and summed across chunks
/// for the document. Once filled by the matcher, every catalog key is present
/// (0 when unmatched), so consumers never need existence checks.
///
/// Ordered maps keep the serialized form stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseCounts {
    /// Counts for high-risk patterns
    #[serde(rename = "HIGH_RISK", default)]
    pub high_risk: BTreeMap<String, u32>,

    /// Counts for medium-risk patterns
    #[serde(rename = "MEDIUM_RISK", default)]
    pub medium_risk: BTreeMap<String, u32>,

    /// Counts for positive patterns
    #[serde(rename = "POSITIVES", default)]
    pub positives: BTreeMap<String, u32>,
}

impl ClauseCounts {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the counts of one category
    pub fn category(&self, category: Category) -> &BTreeMap<String, u32> {
        match category {
            Category::HighRisk => &self.high_risk,
            Category::MediumRisk => &self.medium_risk,
            Category::Positives => &self.positives,
        }
    }

    /// Mutably borrow the counts of one category
    pub fn category_mut(&mut self, category: Category) -> &mut BTreeMap<String, u32> {
        match category {
            Category::HighRisk => &mut self.high_risk,
            Category::MediumRisk => &mut self.medium_risk,
            Category::Positives => &mut self.positives,
        }
    }

    /// Count for a key, 0 if absent
    pub fn get(&self, category: Category, key: &str) -> u32 {
        self.category(category).get(key).copied().unwrap_or(0)
    }

    /// Add `by` occurrences of a key
    pub fn add(&mut self, category: Category, key: &str, by: u32) {
        let slot = self.category_mut(category).entry(key.to_string()).or_insert(0);
        *slot = slot.saturating_add(by);
    }

    /// Insert a zero count for a key that has not been observed
    pub fn ensure(&mut self, category: Category, key: &str) {
        self.category_mut(category).entry(key.to_string()).or_insert(0);
    }

    /// Sum another table into this one, key by key
    ///
    /// Addition is commutative and associative, so merge order never
    /// changes the result.
    pub fn merge(&mut self, other: &ClauseCounts) {
        for (category, key, count) in other.iter() {
            self.add(category, key, count);
        }
    }

    /// Total occurrences across every category and key
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, _, count)| u64::from(count)).sum()
    }

    /// Iterate over `(category, key, count)` triples in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str, u32)> + '_ {
        Category::ALL.into_iter().flat_map(move |category| {
            self.category(category)
                .iter()
                .map(move |(key, count)| (category, key.as_str(), *count))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut counts = ClauseCounts::new();
        counts.add(Category::HighRisk, "ARBITRATION", 2);
        counts.add(Category::HighRisk, "ARBITRATION", 1);
        assert_eq!(counts.get(Category::HighRisk, "ARBITRATION"), 3);
        assert_eq!(counts.get(Category::Positives, "ARBITRATION"), 0);
    }

    #[test]
    fn test_ensure_does_not_overwrite() {
        let mut counts = ClauseCounts::new();
        counts.add(Category::Positives, "CLEAR_OPT_OUT", 4);
        counts.ensure(Category::Positives, "CLEAR_OPT_OUT");
        counts.ensure(Category::Positives, "DATA_EXPORT");
        assert_eq!(counts.get(Category::Positives, "CLEAR_OPT_OUT"), 4);
        assert_eq!(counts.positives.get("DATA_EXPORT"), Some(&0));
    }

    #[test]
    fn test_merge_and_total() {
        let mut a = ClauseCounts::new();
        a.add(Category::HighRisk, "ARBITRATION", 1);
        a.add(Category::MediumRisk, "VAGUE_CONSENT", 2);

        let mut b = ClauseCounts::new();
        b.add(Category::HighRisk, "ARBITRATION", 3);
        b.add(Category::Positives, "NO_DATA_SALE", 1);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.get(Category::HighRisk, "ARBITRATION"), 4);
        assert_eq!(ab.total(), 7);
    }

    #[test]
    fn test_serialized_shape() {
        let mut counts = ClauseCounts::new();
        counts.add(Category::HighRisk, "ARBITRATION", 1);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["HIGH_RISK"]["ARBITRATION"], 1);
        assert!(json["POSITIVES"].as_object().unwrap().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn counts_strategy() -> impl Strategy<Value = ClauseCounts> {
        prop::collection::vec((0usize..3, "[A-D]", 0u32..50), 0..12).prop_map(|entries| {
            let mut counts = ClauseCounts::new();
            for (category, key, count) in entries {
                counts.add(Category::ALL[category], &key, count);
            }
            counts
        })
    }

    proptest! {
        /// Property: merge order never changes the result
        #[test]
        fn test_merge_commutative(a in counts_strategy(), b in counts_strategy()) {
            let mut ab = a.clone();
            ab.merge(&b);
            let mut ba = b.clone();
            ba.merge(&a);
            prop_assert_eq!(ab, ba);
        }

        /// Property: totals add up under merge
        #[test]
        fn test_merge_preserves_total(a in counts_strategy(), b in counts_strategy()) {
            let mut merged = a.clone();
            merged.merge(&b);
            prop_assert_eq!(merged.total(), a.total() + b.total());
        }
    }
}
