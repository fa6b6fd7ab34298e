//! Submission workflow: extract, score against prior submissions, record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CheckerConfig;
use crate::document::Document;
use crate::extract::{ExtractError, TextExtractor};
use crate::similarity::{Checker, Scorer, Strategy};
use crate::submission::{StoreError, SubmissionRecord, SubmissionStore};
use crate::types::identifiers::{DocumentId, DocumentIdError};
use crate::types::report::SimilarityReport;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid submission id: {0}")]
    InvalidId(#[from] DocumentIdError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the submitter is told after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub id: DocumentId,
    pub report: SimilarityReport,
    /// Only a prefix of the upload was checked.
    pub truncated: bool,
    pub submitted_at: DateTime<Utc>,
}

pub struct SubmissionWorkflow<St, E, S = Strategy> {
    store: St,
    extractor: E,
    checker: Checker<S>,
    exclude_own_submissions: bool,
}

impl<St, E> SubmissionWorkflow<St, E, Strategy>
where
    St: SubmissionStore,
    E: TextExtractor,
{
    pub fn from_config(store: St, extractor: E, config: &CheckerConfig) -> Self {
        Self {
            store,
            extractor,
            checker: Checker::from_config(config),
            exclude_own_submissions: config.exclude_own_submissions,
        }
    }
}

impl<St, E, S> SubmissionWorkflow<St, E, S>
where
    St: SubmissionStore,
    E: TextExtractor,
    S: Scorer,
{
    pub fn new(store: St, extractor: E, checker: Checker<S>) -> Self {
        Self {
            store,
            extractor,
            checker,
            exclude_own_submissions: false,
        }
    }

    pub fn exclude_own_submissions(mut self, exclude: bool) -> Self {
        self.exclude_own_submissions = exclude;
        self
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn submit(
        &self,
        submitter: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<SubmissionOutcome, SubmissionError> {
        self.submit_at(submitter, filename, bytes, Utc::now())
    }

    pub fn submit_at(
        &self,
        submitter: &str,
        filename: &str,
        bytes: &[u8],
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        if submitter.trim().is_empty() {
            return Err(SubmissionError::MissingField("submitter"));
        }
        if filename.trim().is_empty() {
            return Err(SubmissionError::MissingField("filename"));
        }
        let id = DocumentId::for_submission(submitter, filename)?;

        let extraction = self.extractor.extract(filename, bytes).map_err(|e| {
            log::warn!("{}: {e}", id.as_str());
            e
        })?;

        let exclude = self.exclude_own_submissions.then_some(submitter);
        let corpus = self.store.corpus(exclude)?;

        let document = Document::from_text(Some(id.clone()), extraction.text);
        let report = self.checker.check(&document, &corpus);

        let record = SubmissionRecord {
            id: id.clone(),
            submitter: submitter.trim().to_string(),
            filename: filename.trim().to_string(),
            score: report.score,
            submitted_at,
            version: document.version.clone(),
            best_match: report
                .best_match
                .as_ref()
                .and_then(|m| corpus.get(m.index))
                .and_then(|doc| doc.id.clone()),
        };
        self.store.append(record, &document.text)?;

        log::info!(
            "recorded {} with score {:.1} against {} prior submissions",
            id.as_str(),
            report.score,
            corpus.len()
        );

        Ok(SubmissionOutcome {
            id,
            report,
            truncated: extraction.truncated,
            submitted_at,
        })
    }
}
