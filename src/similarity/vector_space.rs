//! TF-IDF vectorization and cosine scoring.
//!
//! The model is fitted on every call over `corpus + [query]` and dropped
//! afterwards; nothing is cached between calls.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::scorer::{Comparison, Scorer};
use super::sparse::SparseVector;
use super::tokenize::terms;
use crate::config::VectorSpaceConfig;
use crate::types::report::ScoreOutcome;

#[derive(Debug, Clone, Default)]
pub struct VectorSpaceScorer {
    config: VectorSpaceConfig,
}

impl VectorSpaceScorer {
    pub fn new(config: VectorSpaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VectorSpaceConfig {
        &self.config
    }
}

impl Scorer for VectorSpaceScorer {
    fn name(&self) -> &'static str {
        "vector_space"
    }

    fn compare<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> Comparison {
        if corpus.is_empty() {
            return Comparison::Degenerate(ScoreOutcome::EmptyCorpus);
        }

        let mut collection: Vec<Vec<String>> = corpus
            .iter()
            .map(|entry| terms(entry.as_ref(), self.config.min_term_chars))
            .collect();
        collection.push(terms(query, self.config.min_term_chars));

        let model = TfIdfModel::fit(&collection, &self.config);
        if model.is_empty() {
            return Comparison::Degenerate(ScoreOutcome::DegenerateVocabulary);
        }

        let Some((query_terms, entries)) = collection.split_last() else {
            return Comparison::Degenerate(ScoreOutcome::EmptyCorpus);
        };
        if query_terms.is_empty() {
            return Comparison::Degenerate(ScoreOutcome::EmptyQuery);
        }

        let query_vector = model.transform(query_terms);
        let similarities = entries
            .iter()
            .map(|entry_terms| {
                if entry_terms.is_empty() {
                    None
                } else {
                    Some(query_vector.cosine(&model.transform(entry_terms)))
                }
            })
            .collect();

        Comparison::Entries(similarities)
    }
}

/// Vocabulary and IDF weights fitted over one joint collection.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    sublinear_tf: bool,
}

impl TfIdfModel {
    /// Fit over pre-tokenized documents. Dimensions are assigned in first-seen order.
    pub fn fit(collection: &[Vec<String>], config: &VectorSpaceConfig) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for doc_terms in collection {
            let mut seen = HashSet::new();
            for term in doc_terms {
                let next = vocabulary.len();
                let dim = *vocabulary.entry(term.clone()).or_insert(next);
                if dim == doc_freq.len() {
                    doc_freq.push(0);
                }
                if seen.insert(dim) {
                    doc_freq[dim] += 1;
                }
            }
        }

        let doc_count = collection.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| inverse_document_frequency(doc_count, df as f64, config.smooth_idf))
            .collect();

        Self {
            vocabulary,
            idf,
            sublinear_tf: config.sublinear_tf,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&dim| self.idf[dim])
    }

    /// L2-normalised TF-IDF vector of a document. Unknown terms are ignored.
    pub fn transform(&self, doc_terms: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in doc_terms {
            if let Some(&dim) = self.vocabulary.get(term) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let weights = counts
            .into_iter()
            .map(|(dim, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (dim, tf * self.idf[dim])
            })
            .collect();

        let mut vector = SparseVector::from_sorted(weights);
        vector.normalize();
        vector
    }
}

/// Smoothed: `ln((1 + n) / (1 + df)) + 1`. Plain: `ln(n / df) + 1`.
///
/// Both are at least 1 for any term that occurs, so weights stay positive.
fn inverse_document_frequency(doc_count: f64, doc_freq: f64, smooth: bool) -> f64 {
    if smooth {
        ((1.0 + doc_count) / (1.0 + doc_freq)).ln() + 1.0
    } else {
        (doc_count / doc_freq.max(1.0)).ln() + 1.0
    }
}
