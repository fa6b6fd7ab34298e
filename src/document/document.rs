use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::{DocumentId, DocumentVersion};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A unit of text taking part in a scoring call, either the query or a corpus member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocumentId>,
    pub version: DocumentVersion,
    pub text: String,
}

impl Document {
    /// Ingest raw bytes into a Document.
    ///
    /// Rejects content that is not UTF-8; the version is computed on the
    /// verified text.
    pub fn ingest(id: Option<DocumentId>, raw_content: Vec<u8>) -> Result<Self, DocumentError> {
        let text = String::from_utf8(raw_content)?;
        Ok(Self::from_text(id, text))
    }

    pub fn from_text(id: Option<DocumentId>, text: impl Into<String>) -> Self {
        let text = text.into();
        let version = DocumentVersion::from_content(text.as_bytes());

        Document { id, version, text }
    }

    /// A document with no identifier, e.g. an ad-hoc query.
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self::from_text(None, text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
