//! Isolated execution of the optional ML augmenter
//!
//! Each chunk's augmenter call runs on its own task with its own time budget.
//! A call that errors, times out or panics contributes nothing, and the chunk
//! keeps its rule-based counts.

use std::sync::Arc;
use std::time::Duration;
use termsguard_domain::{AugmentError, Augmentation, ClauseAugmenter, ClauseCounts};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs an optional augmenter across the chunks of a document
#[derive(Clone)]
pub struct AugmentRunner {
    augmenter: Option<Arc<dyn ClauseAugmenter>>,
    timeout: Duration,
}

impl AugmentRunner {
    /// Create a runner; `None` makes every run a no-op
    pub fn new(augmenter: Option<Arc<dyn ClauseAugmenter>>, timeout: Duration) -> Self {
        Self { augmenter, timeout }
    }

    /// Whether an augmenter is configured
    pub fn is_enabled(&self) -> bool {
        self.augmenter.is_some()
    }

    /// Augment every chunk concurrently
    ///
    /// Returns one augmentation per chunk, in chunk order. `counts` must be
    /// parallel to `chunks`.
    pub async fn run(&self, chunks: &[String], counts: &[ClauseCounts]) -> Vec<Augmentation> {
        let mut results = vec![Augmentation::none(); chunks.len()];
        let Some(augmenter) = &self.augmenter else {
            return results;
        };

        let mut tasks = JoinSet::new();
        for (index, (chunk, counts)) in chunks.iter().zip(counts).enumerate() {
            let augmenter = Arc::clone(augmenter);
            let chunk = chunk.clone();
            let counts = counts.clone();
            let timeout = self.timeout;
            tasks.spawn(async move {
                let outcome = match tokio::time::timeout(timeout, augmenter.augment(&chunk, &counts)).await {
                    Ok(result) => result,
                    Err(_) => Err(AugmentError::Unavailable(format!("timed out after {:?}", timeout))),
                };
                (index, outcome)
            });
        }

        let mut applied = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(augmentation))) => {
                    if !augmentation.is_empty() {
                        applied += 1;
                    }
                    results[index] = augmentation;
                }
                Ok((index, Err(e))) => {
                    warn!(chunk = index, error = %e, "Augmenter failed, using rule-based result");
                }
                Err(e) => {
                    warn!(error = %e, "Augmenter task aborted, using rule-based result");
                }
            }
        }

        debug!(chunks = chunks.len(), applied, "Augmented chunks");
        results
    }
}
