use std::collections::HashSet;

use super::scorer::{Comparison, Scorer};
use super::tokenize::token_set;
use crate::types::report::ScoreOutcome;

/// Jaccard-style overlap of whitespace token sets.
///
/// Needs nothing beyond the standard library; this is the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl Scorer for LexicalScorer {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn compare<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> Comparison {
        if corpus.is_empty() {
            return Comparison::Degenerate(ScoreOutcome::EmptyCorpus);
        }

        let query_tokens = token_set(query);
        if query_tokens.is_empty() {
            return Comparison::Degenerate(ScoreOutcome::EmptyQuery);
        }

        let similarities = corpus
            .iter()
            .map(|entry| token_overlap(&query_tokens, &token_set(entry.as_ref())))
            .collect();

        Comparison::Entries(similarities)
    }
}

/// `|a ∩ b| / max(|a|, |b|)`, or `None` if either set is empty.
pub fn token_overlap(a: &HashSet<String>, b: &HashSet<String>) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let common = a.intersection(b).count();
    Some(common as f64 / a.len().max(b.len()) as f64)
}
