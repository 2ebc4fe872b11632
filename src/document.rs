//! Core document types.
//!
//! A [`Document`] is a ranked search result: the document's id together with
//! the relevance computed for the query and the stored rating. The engine
//! itself keeps text and metadata internally; results carry only these three
//! fields.

use serde::{Deserialize, Serialize};

/// Identifier of a stored document. Unique within a [`SearchServer`](crate::SearchServer).
pub type DocumentId = u32;

/// Lifecycle tag attached to every document.
///
/// The engine never interprets the status; it is exposed to the caller's
/// filter predicate and returned by matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live content, the default search target.
    Actual,
    /// Content kept around but no longer relevant.
    Irrelevant,
    /// Content hidden by moderation.
    Banned,
    /// Content scheduled for deletion.
    Removed,
}

/// A single ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id the document was added under.
    pub id: DocumentId,
    /// TF-IDF relevance for the query that produced this result.
    pub relevance: f64,
    /// Averaged rating stored at add time.
    pub rating: i32,
}

impl Document {
    /// Creates a result record.
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}
