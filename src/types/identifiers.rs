use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Stable name of a submitted document: `submitter/filename`, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentIdError {
    #[error("Document id component is empty")]
    EmptyComponent,
    #[error("Document id component contains a path separator: {0}")]
    Separator(String),
}

impl DocumentId {
    /// Build the id of a submission from its submitter and uploaded filename.
    pub fn for_submission(submitter: &str, filename: &str) -> Result<Self, DocumentIdError> {
        let submitter = normalize_component(submitter)?;
        let filename = normalize_component(filename)?;

        Ok(DocumentId(format!("{submitter}/{filename}")))
    }

    /// Wrap an arbitrary caller-chosen label (e.g. a filename of a reference text).
    pub fn new(label: impl Into<String>) -> Result<Self, DocumentIdError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(DocumentIdError::EmptyComponent);
        }
        Ok(DocumentId(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn normalize_component(raw: &str) -> Result<String, DocumentIdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DocumentIdError::EmptyComponent);
    }
    if trimmed.contains(['/', '\\']) {
        return Err(DocumentIdError::Separator(trimmed.to_string()));
    }

    Ok(trimmed.to_lowercase())
}

/// Content hash version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentVersion(String);

impl DocumentVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DocumentVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare hex digest, without the algorithm prefix.
    pub fn digest(&self) -> Option<&str> {
        self.0.strip_prefix("sha256:")
    }
}
