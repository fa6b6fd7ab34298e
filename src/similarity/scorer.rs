use crate::types::report::{MatchResult, ScoreOutcome};

/// Per-entry comparison produced by a scoring strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// The call was resolved before any entry could be compared.
    Degenerate(ScoreOutcome),
    /// One similarity in `[0, 1]` per corpus entry, `None` where the entry was skipped.
    Entries(Vec<Option<f64>>),
}

/// The capability shared by every scoring strategy.
///
/// Implementations must be pure: the same query and corpus always yield the
/// same comparison, and no state survives between calls.
pub trait Scorer {
    fn name(&self) -> &'static str;

    fn compare<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> Comparison;

    fn score_with_match<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> MatchResult {
        let result = match self.compare(query, corpus) {
            Comparison::Degenerate(outcome) => {
                let skipped = if outcome == ScoreOutcome::DegenerateVocabulary {
                    corpus.len()
                } else {
                    0
                };
                MatchResult::zero(outcome, skipped)
            }
            Comparison::Entries(similarities) => best_match(&similarities),
        };

        log::debug!(
            "{} scored query against {} entries: {:.2} (best {:?}, skipped {}, {:?})",
            self.name(),
            corpus.len(),
            result.score,
            result.best_match,
            result.skipped,
            result.outcome,
        );
        result
    }

    /// Maximum similarity against any corpus entry, as a percentage in `[0, 100]`.
    fn score<S: AsRef<str>>(&self, query: &str, corpus: &[S]) -> f64 {
        self.score_with_match(query, corpus).score
    }
}

/// Reduce per-entry similarities to the single best match.
///
/// Ties keep the earliest index. A best similarity of zero is reported
/// without a match, since nothing overlapped.
pub fn best_match(similarities: &[Option<f64>]) -> MatchResult {
    let mut skipped = 0;
    let mut best: Option<(usize, f64)> = None;

    for (index, similarity) in similarities.iter().copied().enumerate() {
        let Some(similarity) = similarity.filter(|s| s.is_finite()) else {
            log::debug!("corpus entry {index} skipped");
            skipped += 1;
            continue;
        };
        match best {
            Some((_, current)) if similarity <= current => {}
            _ => best = Some((index, similarity)),
        }
    }

    match best {
        None => MatchResult::zero(ScoreOutcome::NoComparableEntries, skipped),
        Some((index, similarity)) => {
            let score = to_percentage(similarity);
            MatchResult {
                score,
                best_match: (score > 0.0).then_some(index),
                skipped,
                outcome: ScoreOutcome::Scored,
            }
        }
    }
}

/// Convert a `[0, 1]` similarity to a percentage, clamped against floating-point drift.
pub fn to_percentage(similarity: f64) -> f64 {
    let percentage = similarity * 100.0;
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}
