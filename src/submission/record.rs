use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{DocumentId, DocumentVersion};

/// One entry of the submission log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: DocumentId,
    pub submitter: String,
    pub filename: String,
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
    /// Hash of the submitted text; also names the stored text.
    pub version: DocumentVersion,
    pub best_match: Option<DocumentId>,
}

/// Aggregate view over the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub submissions: usize,
    pub average_score: Option<f64>,
    pub flagged: usize,
}

impl StoreSummary {
    pub fn from_records(records: &[SubmissionRecord], flag_threshold: f64) -> Self {
        let submissions = records.len();
        let average_score = (submissions > 0)
            .then(|| records.iter().map(|r| r.score).sum::<f64>() / submissions as f64);
        let flagged = records.iter().filter(|r| r.score >= flag_threshold).count();

        Self {
            submissions,
            average_score,
            flagged,
        }
    }
}
