//! src/terms.rs
use crate::normalizer::normalize;
use std::collections::HashSet;

/// Phrases indexed by the bigram variant when nothing else is configured.
pub const DEFAULT_TARGET_BIGRAMS: [&str; 5] = [
    "computer science",
    "information retrieval",
    "power politics",
    "los angeles",
    "bruce willis",
];

/// Derives the countable terms of one document from its normalized tokens.
pub trait TermExtractor: Send + Sync {
    fn extract(&self, tokens: &[String]) -> Vec<String>;
}

/// Every token is a term. Duplicates are kept for the aggregator to count.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unigrams;

impl TermExtractor for Unigrams {
    fn extract(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| !token.is_empty())
            .cloned()
            .collect()
    }
}

/// Read-only set of bigrams worth indexing, stored as `"first second"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigramAllowList(HashSet<String>);

impl BigramAllowList {
    /// Builds the list from free-form phrases. Each phrase goes through the
    /// normalizer first, so `"Los-Angeles"` becomes `"los angeles"`; phrases
    /// that do not come out as exactly two tokens can never match and are
    /// dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bigrams = HashSet::new();
        for phrase in phrases {
            let tokens = normalize(phrase.as_ref());
            if tokens.len() == 2 {
                bigrams.insert(tokens.join(" "));
            } else {
                tracing::warn!(
                    phrase = phrase.as_ref(),
                    "Ignoring target bigram that does not normalize to two words"
                );
            }
        }
        BigramAllowList(bigrams)
    }

    pub fn contains(&self, bigram: &str) -> bool {
        self.0.contains(bigram)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BigramAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_BIGRAMS)
    }
}

/// Adjacent token pairs that appear in the allow-list.
#[derive(Debug, Clone)]
pub struct SelectedBigrams {
    allow_list: BigramAllowList,
}

impl SelectedBigrams {
    pub fn new(allow_list: BigramAllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &BigramAllowList {
        &self.allow_list
    }
}

impl TermExtractor for SelectedBigrams {
    fn extract(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .windows(2)
            .filter(|pair| !pair[0].is_empty() && !pair[1].is_empty())
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .filter(|bigram| self.allow_list.contains(bigram))
            .collect()
    }
}
