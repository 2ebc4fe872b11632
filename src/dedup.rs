//! Duplicate-document detection.
//!
//! Two documents are duplicates when they contain exactly the same set of
//! words after stop-word removal, regardless of order and frequency. The
//! first-added document (lowest id) wins; later duplicates are removed
//! through the normal removal path.

use crate::document::DocumentId;
use crate::server::SearchServer;
use std::collections::HashSet;
use tracing::info;

/// Removes every document whose word set duplicates an earlier document's.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut duplicates = Vec::new();

    for id in &*server {
        // Forward-index keys are ordered, so the word set is a ready key.
        let words: Vec<String> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        info!(id, "removing duplicate document");
        server.remove_document(id);
    }
    duplicates
}
