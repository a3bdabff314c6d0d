//! Single-pass clause matcher
//!
//! Every catalog fragment is wrapped in a named group `CATEGORY__KEY` and the
//! groups are joined into one alternation, so each chunk is scanned once no
//! matter how many patterns the catalog holds. Group names are resolved to
//! pattern ids when the engine is built; matching only walks a slot table.

use crate::catalog::{Catalog, ClausePattern};
use crate::error::EngineError;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use termsguard_domain::ClauseCounts;
use tracing::{debug, info};

/// Compiled-size ceiling for the combined alternation
const REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Matches nothing; used when the catalog is empty
const NEVER_MATCHES: &str = r"[^\s\S]";

/// Compiled clause catalog
///
/// Immutable once built. Share it behind an `Arc` and build a new one to
/// change the catalog.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    catalog: Catalog,
    regex: Regex,
    /// `(capture slot, pattern index)` for every catalog group
    slots: Vec<(usize, usize)>,
}

impl PatternEngine {
    /// Compile a catalog
    ///
    /// Fails if any fragment, or the combined alternation, does not compile.
    pub fn new(catalog: Catalog) -> Result<Self, EngineError> {
        for pattern in catalog.patterns() {
            compile(&pattern.pattern).map_err(|e| EngineError::PatternCompilation {
                key: pattern.group_name(),
                message: e.to_string(),
            })?;
        }

        let source = if catalog.is_empty() {
            NEVER_MATCHES.to_string()
        } else {
            catalog
                .patterns()
                .iter()
                .map(|p| format!("(?P<{}>{})", p.group_name(), p.pattern))
                .collect::<Vec<_>>()
                .join("|")
        };
        let regex = compile(&source).map_err(|e| EngineError::PatternCompilation {
            key: "catalog".to_string(),
            message: e.to_string(),
        })?;

        let ids: HashMap<String, usize> = catalog
            .patterns()
            .iter()
            .enumerate()
            .map(|(id, p)| (p.group_name(), id))
            .collect();
        let slots: Vec<(usize, usize)> = regex
            .capture_names()
            .enumerate()
            .filter_map(|(slot, name)| name.and_then(|n| ids.get(n)).map(|id| (slot, *id)))
            .collect();

        info!(
            patterns = catalog.len(),
            groups = slots.len(),
            "Compiled clause pattern engine"
        );

        Ok(Self {
            catalog,
            regex,
            slots,
        })
    }

    /// Compile the built-in catalog
    pub fn builtin() -> Result<Self, EngineError> {
        Self::new(Catalog::builtin())
    }

    /// The catalog this engine was built from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Count clause occurrences in one chunk
    ///
    /// Text is lowercased before scanning. The returned table holds every
    /// catalog key, with 0 for keys that did not match.
    pub fn count_clauses(&self, text: &str) -> ClauseCounts {
        let lower = text.to_lowercase();
        let patterns = self.catalog.patterns();
        let mut counts = ClauseCounts::new();
        let mut matches = 0usize;

        for caps in self.regex.captures_iter(&lower) {
            matches += 1;
            for &(slot, id) in &self.slots {
                if caps.get(slot).is_some() {
                    let ClausePattern { category, key, .. } = &patterns[id];
                    counts.add(*category, key, 1);
                }
            }
        }

        self.catalog.fill_missing(&mut counts);
        debug!(matches, chars = lower.len(), "Scanned chunk");
        counts
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_SIZE_LIMIT)
        .build()
}
