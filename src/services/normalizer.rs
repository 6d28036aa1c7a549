//! Text normalization for the inference pipeline
//!
//! Produces the exact document form the vectorizer was fitted on: lowercase,
//! ASCII letters only, stopwords removed, tokens rejoined with single spaces.
//! The transform is deterministic and idempotent on its own output.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Everything the strip pass removes: any character that is not a lowercase
/// ASCII letter or whitespace. Applied after lowercasing, so uppercase is
/// already gone; digits, punctuation and non-ASCII letters all match.
static NON_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s]").expect("literal pattern compiles"));

/// Stopword resource errors
#[derive(Debug, Error)]
pub enum StopwordError {
    /// Stopword list could not be read
    #[error("failed to read stopword list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stopword list contained no words
    #[error("stopword list {0} is empty")]
    Empty(String),
}

/// Text normalizer with a fixed stopword set
pub struct TextNormalizer {
    stop_words: HashSet<String>,
}

impl TextNormalizer {
    /// Create a normalizer from an already-loaded stopword set
    pub fn new(stop_words: HashSet<String>) -> Self {
        Self { stop_words }
    }

    /// Load the stopword list from a resource file, one word per line.
    /// Blank lines are skipped; an empty resulting set is an error so a
    /// missing or truncated resource is caught at startup.
    pub fn from_file(path: &Path) -> Result<Self, StopwordError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StopwordError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let stop_words: HashSet<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_lowercase())
            .collect();

        if stop_words.is_empty() {
            return Err(StopwordError::Empty(path.display().to_string()));
        }

        Ok(Self::new(stop_words))
    }

    /// Number of loaded stopwords
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Normalize a raw feedback string.
    ///
    /// Steps, in order: lowercase, strip non-letter characters, tokenize,
    /// drop stopwords, rejoin with single spaces. Empty input (or input
    /// consisting only of symbols and stopwords) yields the empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = NON_LETTER.replace_all(&lowered, "");

        stripped
            .unicode_words()
            .filter(|token| !self.stop_words.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
