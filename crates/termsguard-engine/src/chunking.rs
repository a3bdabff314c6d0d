//! Sentence-respecting text chunking

use regex::Regex;
use tracing::{debug, warn};

/// Sentence terminator pattern; trailing unterminated text is its own sentence
const SENTENCE_PATTERN: &str = r"[^.!?]+[.!?]+|[^.!?]+$";

/// Splits documents into bounded chunks at sentence boundaries
///
/// Sentences are accumulated greedily until the next one would push the
/// chunk past `chunk_size` characters. A sentence longer than the target is
/// kept whole so no clause is cut across a chunk boundary.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    sentences: Option<Regex>,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(chunk_size: usize) -> Self {
        let sentences = match Regex::new(SENTENCE_PATTERN) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(error = %e, "Sentence splitter unavailable, documents will not be chunked");
                None
            }
        };
        Self {
            chunk_size,
            sentences,
        }
    }

    /// Target chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk the given text
    ///
    /// Always returns at least one chunk. Text with no terminal punctuation
    /// (including the empty string) comes back as a single chunk.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let Some(sentences) = &self.sentences else {
            return vec![text.to_string()];
        };

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for sentence in sentences.find_iter(text).map(|m| m.as_str()) {
            let sentence_len = sentence.chars().count();
            if current_len + sentence_len > self.chunk_size {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = sentence.to_string();
                current_len = sentence_len;
            } else {
                current.push(' ');
                current.push_str(sentence);
                current_len += sentence_len + 1;
            }
        }
        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        if chunks.is_empty() {
            chunks.push(text.to_string());
        }

        debug!(chunk_size = self.chunk_size, chunks = chunks.len(), "Chunked text");
        chunks
    }
}
