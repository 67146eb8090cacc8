//! Token frequency analysis
//!
//! Bodies are joined into one corpus, split into lowercase word tokens,
//! counted, and ranked:
//! - most frequent first
//! - equal counts ordered lexicographically by token
//! - at most `top_k` entries (10 by default)

mod frequency;
mod tokenize;

pub use frequency::{RankedFeature, RankedFeatures, TokenFrequency};
pub use tokenize::{build_corpus, is_word_char, tokenize, CORPUS_SEPARATOR};

use crate::config::{AnalysisConfig, DEFAULT_TOP_K};

/// Ranks the most frequent tokens across a set of bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyAnalyzer {
    top_k: usize,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyAnalyzer {
    /// Creates an analyzer keeping the default 10 features
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::with_top_k(config.top_k)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Counts the tokens of all bodies joined into one corpus
    pub fn frequencies<S: AsRef<str>>(&self, bodies: &[S]) -> TokenFrequency {
        TokenFrequency::from_text(&build_corpus(bodies))
    }

    /// Ranks already-counted tokens
    pub fn rank(&self, frequency: &TokenFrequency) -> RankedFeatures {
        frequency.top(self.top_k)
    }

    /// Counts and ranks in one step
    ///
    /// An empty input (or one with no word characters) yields an empty
    /// ranking.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_harvest::analysis::FrequencyAnalyzer;
    ///
    /// let ranked = FrequencyAnalyzer::new().analyze(&["def foo(): pass", "def bar(): pass"]);
    /// assert_eq!(ranked.tokens(), vec!["def", "pass", "bar", "foo"]);
    /// ```
    pub fn analyze<S: AsRef<str>>(&self, bodies: &[S]) -> RankedFeatures {
        self.rank(&self.frequencies(bodies))
    }
}
