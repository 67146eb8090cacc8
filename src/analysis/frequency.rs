use crate::analysis::tokenize::tokenize;
use std::collections::HashMap;

/// Token → occurrence count for a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TokenFrequency {
    /// Counts the tokens of `text`
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total = 0;

        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
            total += 1;
        }

        Self { counts, total }
    }

    /// Count for `token`; zero when absent
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of tokens counted, repeats included
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over (token, count) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// The `k` most frequent tokens
    ///
    /// Sorted by descending count; equal counts are ordered by token,
    /// lexicographically ascending, so the result never depends on the order
    /// the text was read in.
    pub fn top(&self, k: usize) -> RankedFeatures {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let features = entries
            .into_iter()
            .take(k)
            .map(|(token, count)| RankedFeature {
                token: token.clone(),
                count: *count,
            })
            .collect();

        RankedFeatures { features }
    }
}

/// A token and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedFeature {
    pub token: String,
    pub count: u64,
}

/// The most frequent tokens, most frequent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedFeatures {
    features: Vec<RankedFeature>,
}

impl RankedFeatures {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedFeature> {
        self.features.iter()
    }

    /// The ranked tokens without their counts
    pub fn tokens(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.token.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[RankedFeature] {
        &self.features
    }
}

impl<'a> IntoIterator for &'a RankedFeatures {
    type Item = &'a RankedFeature;
    type IntoIter = std::slice::Iter<'a, RankedFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
