//! Clause pattern catalog
//!
//! Regex fragments for legally significant clauses, grouped by risk
//! category. Fragments are matched against lowercased text, case-insensitively.

use crate::error::EngineError;
use std::collections::HashSet;
use termsguard_domain::{Category, ClauseCounts};

/// Built-in clause patterns: `(category, key, fragment)`
const BUILTIN_PATTERNS: &[(Category, &str, &str)] = &[
    // High risk
    (Category::HighRisk, "ARBITRATION", r"(binding\s+)?arbitration|arbitral\s+tribunal"),
    (
        Category::HighRisk,
        "CLASS_ACTION_WAIVER",
        r"class\s+action\s+waiver|waiver\s+of\s+class\s+action|waiv(?:e|er)\s+.*class\s+action",
    ),
    (
        Category::HighRisk,
        "UNILATERAL_CHANGES",
        r"(we\s+may\s+(modify|change|amend))|(we\s+reserve\s+the\s+right\s+to\s+(modify|change|amend))|((?:the\s+)?(?:company|corporation|service\s+provider|provider)\s+reserves?\s+(?:the\s+)?(?:unilateral\s+)?right\s+to\s+(modify|change|amend))",
    ),
    (Category::HighRisk, "DATA_SALE_OR_SHARING", r"sell\s+your\s+data|share\s+your\s+personal\s+data"),
    (Category::HighRisk, "AUTO_RENEWAL_FRICTION", r"auto-?renew(al)?|automatic\s+renewal"),
    (Category::HighRisk, "NEGATIVE_OPTION_BILLING", r"negative\s+option"),
    (
        Category::HighRisk,
        "DELEGATION_ARBITRABILITY",
        r"exclusive\s+authority\s+to\s+determine\s+arbitrability|arbitrator\s+shall\s+decide\s+arbitrability",
    ),
    // Medium risk
    (Category::MediumRisk, "ARBITRATION_CARVEOUTS", r"arbitration\s+except\s+for|small\s+claims\s+court"),
    (Category::MediumRisk, "VAGUE_CONSENT", r"consent\s+.*(implied|deemed)"),
    (Category::MediumRisk, "LIMITED_RETENTION_DISCLOSURE", r"retain\s+your\s+data\s+for\s+(a|an)\s+period"),
    (Category::MediumRisk, "MORAL_RIGHTS_WAIVER", r"waive\s+(any|all)\s+moral\s+rights|moral\s+rights\s+waive"),
    (
        Category::MediumRisk,
        "JURY_TRIAL_WAIVER",
        r"waive\s+(the\s+)?(right\s+to\s+)?(a\s+)?jury\s+trial|jury\s+trial\s+waiver",
    ),
    (
        Category::MediumRisk,
        "LIABILITY_LIMITATION",
        r"limitation\s+of\s+liability|limit(?:s|ed)?\s+(our\s+)?liabilit(y|ies)|no\s+liability\s+for",
    ),
    (Category::MediumRisk, "ALGORITHMIC_DECISIONS", r"automated\s+(decision|processing)|algorithmic|profiling"),
    // Positives
    (Category::Positives, "CLEAR_OPT_OUT", r"opt-?out\s+(procedure|process)"),
    (Category::Positives, "SELF_SERVICE_DELETION", r"(delete|erase)\s+your\s+account|remove\s+your\s+data"),
    (Category::Positives, "NO_DATA_SALE", r"we\s+do\s+not\s+sell\s+(your\s+)?(personal\s+)?data"),
    (Category::Positives, "TRANSPARENT_RETENTION", r"(retain|store)\s+data\s+for\s+\d+\s+(days|months|years)"),
    (
        Category::Positives,
        "PLAIN_LANGUAGE",
        r"(plain\s+language|summary|in\s+plain\s+english|readable\s+summary)",
    ),
    (Category::Positives, "OWNERSHIP_RETENTION", r"you\s+retain\s+ownership\s+of\s+your\s+content"),
    (Category::Positives, "DATA_EXPORT", r"(export|download)\s+your\s+data"),
];

/// A named clause rule tied to a risk category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClausePattern {
    /// Risk category
    pub category: Category,

    /// Identifier, unique within its category
    pub key: String,

    /// Regex fragment
    pub pattern: String,
}

impl ClausePattern {
    /// Create a new clause pattern
    pub fn new(category: Category, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
            pattern: pattern.into(),
        }
    }

    /// Capture group name encoding category and key
    pub fn group_name(&self) -> String {
        format!("{}__{}", self.category.as_str(), self.key)
    }
}

/// Validated set of clause patterns
///
/// Keys are unique per category and usable as capture group names.
/// Fragments are not compiled here; see `PatternEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    patterns: Vec<ClausePattern>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or malformed keys
    pub fn new(patterns: Vec<ClausePattern>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !is_valid_key(&pattern.key) {
                return Err(EngineError::InvalidKey(pattern.key.clone()));
            }
            if !seen.insert((pattern.category, pattern.key.as_str())) {
                return Err(EngineError::DuplicatePattern {
                    category: pattern.category,
                    key: pattern.key.clone(),
                });
            }
        }
        Ok(Self { patterns })
    }

    /// The built-in terms-of-service / privacy-policy catalog
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS
                .iter()
                .map(|(category, key, pattern)| ClausePattern::new(*category, *key, *pattern))
                .collect(),
        }
    }

    /// Return a copy of this catalog with one more pattern
    pub fn with_pattern(&self, pattern: ClausePattern) -> Result<Self, EngineError> {
        let mut patterns = self.patterns.clone();
        patterns.push(pattern);
        Self::new(patterns)
    }

    /// All patterns, in scan order
    pub fn patterns(&self) -> &[ClausePattern] {
        &self.patterns
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Keys of one category, in scan order
    pub fn keys(&self, category: Category) -> impl Iterator<Item = &str> + '_ {
        self.patterns
            .iter()
            .filter(move |p| p.category == category)
            .map(|p| p.key.as_str())
    }

    /// Insert a zero for every catalog key missing from `counts`
    pub fn fill_missing(&self, counts: &mut ClauseCounts) {
        for pattern in &self.patterns {
            counts.ensure(pattern.category, &pattern.key);
        }
    }

    /// A count table with every catalog key at zero
    pub fn empty_counts(&self) -> ClauseCounts {
        let mut counts = ClauseCounts::new();
        self.fill_missing(&mut counts);
        counts
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
