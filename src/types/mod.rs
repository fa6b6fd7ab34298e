pub mod identifiers;
pub mod report;

pub use identifiers::{DocumentId, DocumentIdError, DocumentVersion};
pub use report::{MatchResult, MatchedDocument, ScoreOutcome, SimilarityReport};
