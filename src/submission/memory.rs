use std::sync::Mutex;

use super::{corpus_document, is_excluded, StoreError, SubmissionRecord, SubmissionStore};
use crate::document::Corpus;

/// Submission log held in process memory.
#[derive(Debug, Default)]
pub struct MemorySubmissionStore {
    entries: Mutex<Vec<(SubmissionRecord, String)>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for MemorySubmissionStore {
    fn append(&self, record: SubmissionRecord, text: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.push((record, text.to_string()));
        Ok(())
    }

    fn records(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.iter().map(|(record, _)| record.clone()).collect())
    }

    fn corpus(&self, exclude_submitter: Option<&str>) -> Result<Corpus, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .iter()
            .filter(|(record, _)| !is_excluded(record, exclude_submitter))
            .map(|(record, text)| corpus_document(record, text.clone()))
            .collect())
    }
}
