//! Error types for the search engine.

use crate::document::DocumentId;

/// Errors surfaced by the public engine surface.
///
/// Every variant except [`DocumentNotFound`](SearchError::DocumentNotFound)
/// reports malformed input the caller could have prevented; the engine's
/// state is unchanged when any of them is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A stop word, document word, or query word contains a control byte.
    #[error("word {0:?} contains a control character")]
    InvalidWord(String),
    /// `add_document` was called with an id that is already present.
    #[error("document {0} already exists")]
    DuplicateDocument(DocumentId),
    /// A query token is a lone `-` or starts with `--`.
    #[error("malformed query token {0:?}")]
    MalformedQuery(String),
    /// `match_document` was called with an id the engine does not know.
    #[error("unknown document {0}")]
    DocumentNotFound(DocumentId),
}
