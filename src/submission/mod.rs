pub mod file;
pub mod memory;
pub mod record;

use thiserror::Error;

use crate::document::{Corpus, Document};
pub use file::FileSubmissionStore;
pub use memory::MemorySubmissionStore;
pub use record::{StoreSummary, SubmissionRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),
    #[error("Stored text does not match its hash: {0}")]
    HashMismatch(String),
    #[error("Unsupported log format version: {0}")]
    UnsupportedFormat(String),
    #[error("Submission store lock poisoned")]
    Poisoned,
}

/// Append-only log of past submissions and their texts.
///
/// Implementations serialise their own writes; callers may share a store
/// between threads.
pub trait SubmissionStore {
    fn append(&self, record: SubmissionRecord, text: &str) -> Result<(), StoreError>;

    /// All records in submission order.
    fn records(&self) -> Result<Vec<SubmissionRecord>, StoreError>;

    /// Prior texts in submission order, optionally leaving out one submitter's own work.
    fn corpus(&self, exclude_submitter: Option<&str>) -> Result<Corpus, StoreError>;

    fn summary(&self, flag_threshold: f64) -> Result<StoreSummary, StoreError> {
        Ok(StoreSummary::from_records(&self.records()?, flag_threshold))
    }
}

/// Submitters are the same person under the folding `DocumentId` applies.
pub(crate) fn is_excluded(record: &SubmissionRecord, exclude_submitter: Option<&str>) -> bool {
    exclude_submitter
        .is_some_and(|s| s.trim().to_lowercase() == record.submitter.trim().to_lowercase())
}

pub(crate) fn corpus_document(record: &SubmissionRecord, text: String) -> Document {
    Document::from_text(Some(record.id.clone()), text)
}
