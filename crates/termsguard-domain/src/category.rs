//! Category module - risk buckets for clause patterns

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk category a clause pattern is filed under
///
/// Penalty categories carry negative weights, positives carry bonuses:
/// - HighRisk: clauses that strip the reader of remedies (arbitration, waivers)
/// - MediumRisk: clauses that weaken but do not remove a right
/// - Positives: protections offered to the reader (opt-out, deletion)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Severe penalties
    #[serde(rename = "HIGH_RISK")]
    HighRisk,

    /// Moderate penalties
    #[serde(rename = "MEDIUM_RISK")]
    MediumRisk,

    /// Bonuses
    #[serde(rename = "POSITIVES")]
    Positives,
}

impl Category {
    /// Every category, in scan order
    pub const ALL: [Category; 3] = [Category::HighRisk, Category::MediumRisk, Category::Positives];

    /// Get the category name as used in serialized clause counts
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HighRisk => "HIGH_RISK",
            Category::MediumRisk => "MEDIUM_RISK",
            Category::Positives => "POSITIVES",
        }
    }

    /// Parse a category from its serialized name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH_RISK" => Some(Category::HighRisk),
            "MEDIUM_RISK" => Some(Category::MediumRisk),
            "POSITIVES" => Some(Category::Positives),
            _ => None,
        }
    }

    /// Whether matches in this category count against the document
    pub fn is_penalty(&self) -> bool {
        !matches!(self, Category::Positives)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid clause category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("medium_risk"), Some(Category::MediumRisk));
        assert_eq!(Category::parse("LOW_RISK"), None);
    }

    #[test]
    fn test_penalty_categories() {
        assert!(Category::HighRisk.is_penalty());
        assert!(Category::MediumRisk.is_penalty());
        assert!(!Category::Positives.is_penalty());
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&Category::HighRisk).unwrap();
        assert_eq!(json, "\"HIGH_RISK\"");
    }
}
