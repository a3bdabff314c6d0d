//! Uncommon words and legal dictionary terms
//!
//! Words outside a common-word list are looked up through a
//! [`DefinitionLookup`]. Lookups are optional and never fail an analysis:
//! errors are logged and the word is skipped, and once the backend reports
//! itself unavailable, stops answering in time, or the document's overall
//! lookup budget runs out, no further lookups are attempted for it.

use async_trait::async_trait;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use termsguard_domain::{DefinitionLookup, DictionaryTerm, LookupError, UncommonWord};
use tracing::{debug, warn};

/// Words never treated as uncommon
pub const COMMON_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "is", "it", "of",
    "on", "or", "so", "the", "to", "up", "with", "you", "your", "i", "me", "my", "we", "us",
    "our", "he", "him", "his", "she", "her", "they", "them", "their", "itself", "this", "that",
    "these", "those", "yes", "no", "one", "two", "first", "second", "have", "has", "do", "does",
    "did", "will", "would", "can", "could", "shall", "should", "may", "might", "must", "not",
    "all", "any", "some", "each", "every", "such", "more", "most", "many", "much", "few", "less",
    "least", "own", "same", "other", "another", "new", "old", "good", "bad", "great", "small",
    "large", "long", "short", "high", "low", "early", "late", "young", "right", "left", "next",
    "last", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth", "about",
    "after", "again", "against", "between", "both", "down", "during", "from", "how", "into",
    "just", "like", "now", "only", "out", "over", "then", "there", "through", "under", "very",
    "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "without",
];

const BUILTIN_GLOSSARY: &[(&str, &str)] = &[
    ("liability", "Legal responsibility for damages or losses."),
    ("indemnity", "Protection against legal claims or damages."),
    ("indemnify", "To compensate another party for harm or loss."),
    ("warranty", "A guarantee about the quality or performance of a product or service."),
    ("disclaimer", "A statement that denies legal responsibility."),
    ("confidentiality", "The practice of keeping information secret or private."),
    ("jurisdiction", "The legal authority of a court to hear and decide a case."),
    ("arbitration", "A method of dispute resolution outside of court."),
    ("arbitrator", "A neutral person chosen to decide a dispute outside of court."),
    ("termination", "The end of a legal agreement or contract."),
    ("breach", "The failure to fulfill a legal obligation."),
    ("compliance", "The act of following rules, regulations, or laws."),
    ("consent", "Permission or agreement to something."),
    ("disclosure", "The act of revealing information."),
    ("limitation", "A restriction or constraint on legal liability."),
    ("modification", "A change to the terms of an agreement."),
    ("notification", "The act of informing someone about something."),
    ("obligation", "A legal duty or responsibility."),
    ("provision", "A clause or condition in a legal document."),
    ("restriction", "A limitation on what can be done."),
    ("violation", "The act of breaking a rule or law."),
    ("waiver", "The voluntary giving up of a legal right."),
    ("waive", "To voluntarily give up a legal right."),
    ("pursuant", "In accordance with or following."),
    ("aforementioned", "Previously mentioned or stated."),
    ("hereinafter", "From this point forward in the document."),
    ("whereas", "Given that or considering that."),
    ("notwithstanding", "Despite or in spite of."),
    ("thereunder", "Under the authority of or in accordance with."),
    ("hereunder", "Under this document or agreement."),
    ("thereof", "Of that or from that."),
    ("hereof", "Of this document or agreement."),
    ("therein", "In that place or document."),
    ("hereby", "By means of this document or declaration."),
];

/// In-memory definition lookup
#[derive(Debug, Clone, Default)]
pub struct StaticGlossary {
    definitions: HashMap<String, String>,
}

impl StaticGlossary {
    /// An empty glossary
    pub fn new() -> Self {
        Self::default()
    }

    /// Glossary of common single-word legal terms
    pub fn builtin() -> Self {
        let mut glossary = Self::new();
        for (term, definition) in BUILTIN_GLOSSARY {
            glossary.insert(term, definition);
        }
        glossary
    }

    /// Add or replace a definition; terms are stored lowercased
    pub fn insert(&mut self, term: &str, definition: &str) {
        self.definitions
            .insert(term.to_lowercase(), definition.to_string());
    }

    /// Number of defined terms
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the glossary is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[async_trait]
impl DefinitionLookup for StaticGlossary {
    async fn definition(&self, word: &str) -> Result<Option<String>, LookupError> {
        Ok(self.definitions.get(word).cloned())
    }
}

/// Uncommon words and dictionary terms found in a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermReport {
    /// Defined words in first-appearance order
    pub uncommon_words: Vec<UncommonWord>,

    /// Defined tokens by descending frequency
    pub dictionary_terms: Vec<DictionaryTerm>,
}

/// Limits for a [`TermScanner`]
#[derive(Debug, Clone)]
pub struct TermScannerConfig {
    /// Maximum uncommon words reported
    pub max_uncommon_words: usize,

    /// Maximum dictionary terms reported
    pub max_dictionary_terms: usize,

    /// Budget for a single lookup
    pub lookup_timeout: Duration,

    /// Budget for all lookups of one scan
    pub scan_budget: Duration,

    /// Words skipped in addition to [`COMMON_WORDS`]
    pub extra_common_words: Vec<String>,
}

/// Scans documents for words the dictionary can define
pub struct TermScanner {
    lookup: Option<Arc<dyn DefinitionLookup>>,
    common: HashSet<String>,
    config: TermScannerConfig,
    words: Option<Regex>,
    tokens: Option<Regex>,
}

impl TermScanner {
    /// Create a scanner; without a lookup every scan reports nothing
    pub fn new(lookup: Option<Arc<dyn DefinitionLookup>>, config: TermScannerConfig) -> Self {
        let common = COMMON_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(config.extra_common_words.iter().map(|w| w.to_lowercase()))
            .collect();
        Self {
            lookup,
            common,
            config,
            words: build(r"\b[a-z]+\b"),
            tokens: build(r"\b[a-z][a-z0-9]{2,}\b"),
        }
    }

    /// Whether a lookup is configured
    pub fn has_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// Find uncommon words and dictionary terms in `text`
    pub async fn scan(&self, text: &str) -> TermReport {
        let Some(lookup) = &self.lookup else {
            return TermReport::default();
        };
        let lower = text.to_lowercase();
        let mut session = LookupSession::new(
            lookup.as_ref(),
            self.config.lookup_timeout,
            Instant::now() + self.config.scan_budget,
        );

        let mut uncommon_words = Vec::new();
        if let Some(words) = &self.words {
            let candidates: Vec<&str> = words.find_iter(&lower).map(|m| m.as_str()).collect();
            let mut seen = HashSet::new();
            for word in candidates {
                if uncommon_words.len() >= self.config.max_uncommon_words {
                    break;
                }
                if self.common.contains(word) || !seen.insert(word) {
                    continue;
                }
                if let Some(definition) = session.define(word).await {
                    uncommon_words.push(UncommonWord {
                        word: word.to_string(),
                        definition,
                    });
                }
            }
        }

        let mut dictionary_terms = Vec::new();
        if let Some(tokens) = &self.tokens {
            let mut frequency: HashMap<&str, u32> = HashMap::new();
            let mut order = Vec::new();
            for token in tokens.find_iter(&lower).map(|m| m.as_str()) {
                let count = frequency.entry(token).or_insert(0);
                if *count == 0 {
                    order.push(token);
                }
                *count = count.saturating_add(1);
            }
            for token in order {
                if let Some(definition) = session.define(token).await {
                    dictionary_terms.push(DictionaryTerm {
                        word: token.to_string(),
                        count: frequency[token],
                        definition,
                    });
                }
            }
            dictionary_terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
            dictionary_terms.truncate(self.config.max_dictionary_terms);
        }

        debug!(
            uncommon = uncommon_words.len(),
            terms = dictionary_terms.len(),
            lookups = session.cache.len(),
            "Scanned dictionary terms"
        );
        TermReport {
            uncommon_words,
            dictionary_terms,
        }
    }
}

/// Per-document lookup cache with a circuit breaker
struct LookupSession<'a> {
    lookup: &'a dyn DefinitionLookup,
    timeout: Duration,
    deadline: Instant,
    cache: HashMap<String, Option<String>>,
    available: bool,
}

impl<'a> LookupSession<'a> {
    fn new(lookup: &'a dyn DefinitionLookup, timeout: Duration, deadline: Instant) -> Self {
        Self {
            lookup,
            timeout,
            deadline,
            cache: HashMap::new(),
            available: true,
        }
    }

    async fn define(&mut self, word: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(word) {
            return cached.clone();
        }
        if !self.available {
            return None;
        }

        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!(lookups = self.cache.len(), "Dictionary budget exhausted, skipping remaining lookups");
            self.available = false;
            return None;
        }

        let wait = self.timeout.min(remaining);
        let definition = match tokio::time::timeout(wait, self.lookup.definition(word)).await {
            Ok(Ok(definition)) => definition,
            Ok(Err(LookupError::Backend(message))) => {
                warn!(word, error = %message, "Dictionary lookup failed");
                None
            }
            Ok(Err(e @ LookupError::Unavailable(_))) => {
                warn!(error = %e, "Dictionary unavailable, skipping remaining lookups");
                self.available = false;
                None
            }
            Err(_) => {
                warn!(word, timeout = ?wait, "Dictionary lookup timed out, skipping remaining lookups");
                self.available = false;
                None
            }
        };
        self.cache.insert(word.to_string(), definition.clone());
        definition
    }
}

fn build(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern, error = %e, "Word pattern unavailable");
            None
        }
    }
}
