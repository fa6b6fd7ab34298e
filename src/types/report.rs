use serde::{Deserialize, Serialize};

/// How a scoring call arrived at its number.
///
/// None of these are errors: every variant carries a score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// At least one corpus entry was compared.
    Scored,
    /// The corpus had no entries.
    EmptyCorpus,
    /// The query produced no tokens.
    EmptyQuery,
    /// Every document in the joint collection was empty after preprocessing.
    DegenerateVocabulary,
    /// Every corpus entry was skipped as empty or untokenizable.
    NoComparableEntries,
}

/// Result of `score_with_match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    /// Similarity percentage in `[0, 100]`.
    pub score: f64,
    /// Index of the corpus entry that produced `score`.
    /// `None` when nothing overlapped at all.
    pub best_match: Option<usize>,
    /// Corpus entries left out of the comparison.
    pub skipped: usize,
    pub outcome: ScoreOutcome,
}

impl MatchResult {
    pub fn zero(outcome: ScoreOutcome, skipped: usize) -> Self {
        Self {
            score: 0.0,
            best_match: None,
            skipped,
            outcome,
        }
    }
}

/// The closest corpus document, as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedDocument {
    pub index: usize,
    /// Identifier of the matched document, when the corpus entry had one.
    pub id: Option<String>,
}

/// Serializable outcome of checking one document against a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub strategy: String,
    pub score: f64,
    pub flagged: bool,
    pub outcome: ScoreOutcome,
    pub best_match: Option<MatchedDocument>,
    pub corpus_size: usize,
    pub skipped: usize,
}
