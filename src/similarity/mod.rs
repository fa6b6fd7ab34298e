pub mod lexical;
pub mod scorer;
pub mod sparse;
pub mod tokenize;
pub mod vector_space;

use crate::config::{CheckerConfig, StrategyKind};
use crate::document::{Corpus, Document};
use crate::types::report::{MatchedDocument, SimilarityReport};
pub use lexical::LexicalScorer;
pub use scorer::{best_match, to_percentage, Comparison, Scorer};
pub use vector_space::{TfIdfModel, VectorSpaceScorer};

pub const DEFAULT_FLAG_THRESHOLD: f64 = 50.0;

/// The scoring strategy chosen at composition time.
#[derive(Debug, Clone)]
pub enum Strategy {
    Lexical(LexicalScorer),
    VectorSpace(VectorSpaceScorer),
}

impl Strategy {
    pub fn from_config(config: &CheckerConfig) -> Self {
        match config.strategy {
            StrategyKind::Lexical => Strategy::Lexical(LexicalScorer),
            StrategyKind::VectorSpace => {
                Strategy::VectorSpace(VectorSpaceScorer::new(config.vector_space.clone()))
            }
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Lexical(_) => StrategyKind::Lexical,
            Strategy::VectorSpace(_) => StrategyKind::VectorSpace,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Lexical(LexicalScorer)
    }
}

impl Scorer for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Lexical(s) => s.name(),
            Strategy::VectorSpace(s) => s.name(),
        }
    }

    fn compare<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> Comparison {
        match self {
            Strategy::Lexical(s) => s.compare(query, corpus),
            Strategy::VectorSpace(s) => s.compare(query, corpus),
        }
    }
}

/// Checks documents against a corpus and attributes the closest match.
pub struct Checker<S = Strategy> {
    scorer: S,
    flag_threshold: f64,
}

impl Default for Checker<Strategy> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl Checker<Strategy> {
    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(Strategy::from_config(config)).with_flag_threshold(config.flag_threshold)
    }
}

impl<S> Checker<S>
where
    S: Scorer,
{
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            flag_threshold: DEFAULT_FLAG_THRESHOLD,
        }
    }

    pub fn with_flag_threshold(mut self, flag_threshold: f64) -> Self {
        self.flag_threshold = flag_threshold;
        self
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn flag_threshold(&self) -> f64 {
        self.flag_threshold
    }

    pub fn check(&self, query: &Document, corpus: &Corpus) -> SimilarityReport {
        let result = self.scorer.score_with_match(query.as_str(), corpus.as_slice());

        let best_match = result.best_match.map(|index| MatchedDocument {
            index,
            id: corpus
                .get(index)
                .and_then(|doc| doc.id.as_ref())
                .map(|id| id.as_str().to_string()),
        });

        debug_assert!(
            (0.0..=100.0).contains(&result.score),
            "score {} out of range",
            result.score
        );

        SimilarityReport {
            strategy: self.scorer.name().to_string(),
            score: result.score,
            flagged: result.score >= self.flag_threshold,
            outcome: result.outcome,
            best_match,
            corpus_size: corpus.len(),
            skipped: result.skipped,
        }
    }
}
