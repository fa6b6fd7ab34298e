pub mod corpus;
pub mod document;

pub use crate::types::identifiers::{DocumentId, DocumentVersion};
pub use corpus::Corpus;
pub use document::{Document, DocumentError};
