//! Text normalisation shared by both scoring strategies.
//!
//! Lexical scoring only case-folds and splits on whitespace. Vector-space
//! scoring additionally drops punctuation before splitting into terms.

use std::collections::HashSet;

/// Distinct case-folded, whitespace-delimited tokens.
///
/// No stemming, stopword removal or punctuation stripping: `"fox."` and
/// `"fox"` are different tokens.
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Remove every punctuation or symbol character, keeping letters, digits and whitespace.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !is_punctuation(*c)).collect()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || !(c.is_alphanumeric() || c.is_whitespace())
}

/// Ordered terms for vectorization: case-folded, punctuation stripped, and at
/// least `min_chars` characters long. Repeats are kept for term frequency.
pub fn terms(text: &str, min_chars: usize) -> Vec<String> {
    strip_punctuation(&text.to_lowercase())
        .split_whitespace()
        .filter(|term| term.chars().count() >= min_chars)
        .map(str::to_owned)
        .collect()
}
