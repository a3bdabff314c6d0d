//! Termsguard Domain Layer
//!
//! Value types and trait seams shared by the scoring engine and its callers.
//! Everything here is plain data: no regexes, no runtime, no I/O.
//!
//! ## Key Concepts
//!
//! - **Category**: risk bucket a clause pattern belongs to (high risk, medium risk, positive)
//! - **Clause counts**: per-category, per-pattern-key occurrence totals
//! - **Chunk analysis**: the scored result of one sentence-bounded slice of a document
//! - **Document analysis**: the aggregated, JSON-serializable result handed to callers
//! - **Outcome**: a document analysis tagged as complete or degraded
//!
//! ## Architecture
//!
//! Collaborators that live outside the engine (an ML clause classifier, a
//! legal dictionary service) are expressed as traits in [`traits`] so the
//! engine can be tested without them and run correctly when they are absent.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod category;
pub mod clause;
pub mod grade;
pub mod traits;

// Re-exports for convenience
pub use analysis::{
    AnalysisDetails, AnalysisOutcome, CategoryScore, ChunkAnalysis, DegradedReason,
    DictionaryTerm, DocumentAnalysis, MlCategoryScore, UncommonWord,
};
pub use category::Category;
pub use clause::ClauseCounts;
pub use grade::Grade;
pub use traits::{AugmentError, Augmentation, ClauseAugmenter, DefinitionLookup, LookupError, MlSignal};
