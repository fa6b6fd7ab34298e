//! Deterministic similarity scoring for plagiarism screening.
//!
//! `plagiarism-core` compares a submitted document against a corpus of prior
//! submissions and returns a bounded score in `[0, 100]` together with the
//! closest match. Two interchangeable strategies implement [`Scorer`]:
//! lexical token overlap and TF-IDF cosine similarity. Scoring is stateless
//! and never fails; degenerate inputs score `0.0`.
//!
//! The [`submission`], [`extract`] and [`workflow`] modules assemble the
//! corpus and record results around the scoring core.

pub mod config;
pub mod document;
pub mod extract;
pub mod similarity;
pub mod submission;
pub mod types;
pub mod workflow;

pub use config::{CheckerConfig, StrategyKind};
pub use document::{Corpus, Document};
pub use similarity::{Checker, LexicalScorer, Scorer, Strategy, VectorSpaceScorer};
pub use types::{MatchResult, ScoreOutcome, SimilarityReport};
