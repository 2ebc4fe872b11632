//! The search engine: document store, indexing, ranking, and matching.
//!
//! [`SearchServer`] owns the document store and both indices. Mutating
//! operations take `&mut self`; queries take `&self` and may run in either
//! execution mode. The parallel mode fans plus-word postings out across
//! rayon workers and synchronizes only through the sharded
//! [`ConcurrentMap`](crate::concurrent_map::ConcurrentMap).

use crate::concurrent_map::ConcurrentMap;
use crate::config;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::SearchError;
use crate::index::{ForwardIndex, InvertedIndex, WordFrequencies};
use crate::query::Query;
use crate::stopwords::{is_valid_word, StopWordSet};
use crate::tokenizer::split_words;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use tracing::debug;

/// Chooses how a query or removal executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single thread, no synchronization.
    #[default]
    Sequential,
    /// Work distributed across the rayon thread pool.
    Parallel,
}

/// Canonical empty map returned for unknown ids.
static EMPTY_WORD_FREQUENCIES: LazyLock<WordFrequencies> = LazyLock::new(WordFrequencies::new);

/// Per-document data owned by the store.
#[derive(Debug)]
struct DocumentEntry {
    rating: i32,
    status: DocumentStatus,
    text: String,
}

/// In-memory full-text search engine over short documents.
///
/// Documents are added with an id, a status tag, and a rating sample, and
/// are indexed word by word. Free-text queries combine plus-words and
/// minus-words; results are the top
/// [`MAX_RESULT_COUNT`](config::MAX_RESULT_COUNT) documents by TF-IDF
/// relevance, filtered by status or by an arbitrary caller predicate.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWordSet,
    inverted: InvertedIndex,
    forward: ForwardIndex,
    documents: HashMap<DocumentId, DocumentEntry>,
    document_ids: BTreeSet<DocumentId>,
}

impl SearchServer {
    /// Creates an engine with stop words taken from a space-delimited string.
    pub fn new(stop_words_text: &str) -> Result<Self, SearchError> {
        Self::with_stop_words(split_words(stop_words_text))
    }

    /// Creates an engine with stop words taken from any iterable of words.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            stop_words: StopWordSet::from_words(stop_words)?,
            ..Self::default()
        })
    }

    /// Adds a document under `id`.
    ///
    /// The stored rating is the truncating integer mean of `ratings` (0 for
    /// an empty sample). Fails on an id that is already present and on any
    /// non-stop word containing a control character; a failed add leaves
    /// the engine unchanged.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocument(id));
        }

        let words: Vec<&str> = split_words(text)
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        if let Some(bad) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(SearchError::InvalidWord(bad.to_string()));
        }

        // Each occurrence contributes 1/n independently, n being the
        // non-stop token count.
        let contribution = 1.0 / words.len() as f64;
        self.forward.ensure_entry(id);
        for word in &words {
            self.inverted.accumulate(word, id, contribution);
            self.forward.accumulate(id, word, contribution);
        }

        self.documents.insert(
            id,
            DocumentEntry {
                rating: average_rating(ratings),
                status,
                text: text.to_string(),
            },
        );
        self.document_ids.insert(id);
        debug!(id, words = words.len(), "added document");
        Ok(())
    }

    /// Removes the document under `id`. Unknown ids are a no-op; removal
    /// is idempotent. A removed id may be added again later.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.remove_document_with(ExecutionMode::Sequential, id);
    }

    /// Removes the document under `id` with an explicit execution mode.
    ///
    /// The parallel mode collects the word list across workers; the
    /// posting erases themselves run under `&mut self` and the final state
    /// is identical to the sequential mode.
    pub fn remove_document_with(&mut self, mode: ExecutionMode, id: DocumentId) {
        if let Some(word_frequencies) = self.forward.remove(id) {
            let words: Vec<&String> = match mode {
                ExecutionMode::Sequential => word_frequencies.keys().collect(),
                ExecutionMode::Parallel => word_frequencies
                    .par_iter()
                    .map(|(word, _)| word)
                    .collect(),
            };
            for word in words {
                self.inverted.erase(word, id);
            }
            debug!(id, "removed document");
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
    }

    /// Top documents for `raw_query` with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents for `raw_query` with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        needed_status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_by(raw_query, move |_, status, _| status == needed_status)
    }

    /// Top documents for `raw_query` under a caller predicate, sequentially.
    pub fn find_top_documents_by<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionMode::Sequential, raw_query, filter)
    }

    /// Top documents for `raw_query` under a caller predicate and an
    /// explicit execution mode.
    ///
    /// Results are sorted by descending relevance; documents whose
    /// relevance differs by less than
    /// [`RELEVANCE_EPSILON`](config::RELEVANCE_EPSILON) are ordered by
    /// descending rating, then ascending id. At most
    /// [`MAX_RESULT_COUNT`](config::MAX_RESULT_COUNT) documents are
    /// returned. Both modes produce the same ids in the same order, with
    /// relevance values agreeing within the epsilon.
    pub fn find_top_documents_with<F>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut matched = match mode {
            ExecutionMode::Sequential => self.find_all_documents(&query, &filter),
            ExecutionMode::Parallel => self.find_all_documents_parallel(&query, &filter),
        };
        match mode {
            ExecutionMode::Sequential => matched.sort_by(compare_ranked),
            ExecutionMode::Parallel => matched.par_sort_unstable_by(compare_ranked),
        }
        matched.truncate(config::MAX_RESULT_COUNT);
        Ok(matched)
    }

    /// Plus-words of `raw_query` present in document `id`, with the
    /// document's status.
    ///
    /// Returns the empty list when any minus-word occurs in the document.
    /// The returned slices borrow from `raw_query`. Fails with
    /// [`SearchError::DocumentNotFound`] for an unknown id.
    pub fn match_document<'q>(
        &self,
        raw_query: &'q str,
        id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus), SearchError> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, id)
    }

    /// [`match_document`](Self::match_document) with an explicit execution mode.
    pub fn match_document_with<'q>(
        &self,
        mode: ExecutionMode,
        raw_query: &'q str,
        id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus), SearchError> {
        let status = self
            .documents
            .get(&id)
            .ok_or(SearchError::DocumentNotFound(id))?
            .status;
        let query = Query::parse(raw_query, &self.stop_words)?;

        match mode {
            ExecutionMode::Sequential => {
                for word in &query.minus_words {
                    if self.inverted.contains(word, id) {
                        return Ok((Vec::new(), status));
                    }
                }
                let matched: Vec<&str> = query
                    .plus_words
                    .iter()
                    .copied()
                    .filter(|word| self.inverted.contains(word, id))
                    .collect();
                Ok((matched, status))
            }
            ExecutionMode::Parallel => {
                if query
                    .minus_words
                    .par_iter()
                    .any(|word| self.inverted.contains(word, id))
                {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&str> = query
                    .plus_words
                    .par_iter()
                    .copied()
                    .filter(|word| self.inverted.contains(word, id))
                    .collect();
                matched.par_sort_unstable();
                matched.dedup();
                Ok((matched, status))
            }
        }
    }

    /// Word-frequency map of document `id`. Unknown ids yield a reference
    /// to a process-wide empty map.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.forward
            .word_frequencies(id)
            .unwrap_or(&EMPTY_WORD_FREQUENCIES)
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Stored text of document `id`, or `None` when unknown.
    pub fn document_text(&self, id: DocumentId) -> Option<&str> {
        self.documents.get(&id).map(|entry| entry.text.as_str())
    }

    /// Iterates the live document ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    fn inverse_document_frequency(&self, containing: usize) -> f64 {
        (self.documents.len() as f64 / containing as f64).ln()
    }

    fn find_all_documents<F>(&self, query: &Query<'_>, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: std::collections::BTreeMap<DocumentId, f64> =
            std::collections::BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.inverted.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_frequency(postings.len());
            for (&id, &term_frequency) in postings {
                let Some(entry) = self.documents.get(&id) else {
                    continue;
                };
                if filter(id, entry.status, entry.rating) {
                    *relevance.entry(id).or_insert(0.0) += term_frequency * idf;
                }
            }
        }
        for word in &query.minus_words {
            let Some(postings) = self.inverted.postings(word) else {
                continue;
            };
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
        self.materialize(relevance)
    }

    fn find_all_documents_parallel<F>(&self, query: &Query<'_>, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator = ConcurrentMap::new(config::DEFAULT_SHARD_COUNT);
        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.inverted.postings(word) else {
                return;
            };
            let idf = self.inverse_document_frequency(postings.len());
            for (&id, &term_frequency) in postings {
                let Some(entry) = self.documents.get(&id) else {
                    continue;
                };
                if filter(id, entry.status, entry.rating) {
                    accumulator.add(id, term_frequency * idf);
                }
            }
        });
        // All plus-word contributions are in before any exclusion runs.
        query.minus_words.par_iter().for_each(|word| {
            let Some(postings) = self.inverted.postings(word) else {
                return;
            };
            for &id in postings.keys() {
                accumulator.erase(id);
            }
        });
        self.materialize(accumulator.into_ordinary_map())
    }

    fn materialize(
        &self,
        relevance: std::collections::BTreeMap<DocumentId, f64>,
    ) -> Vec<Document> {
        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                let entry = self.documents.get(&id)?;
                Some(Document::new(id, relevance, entry.rating))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}

/// Relevance descending; near-ties by rating descending, then id ascending.
fn compare_ranked(a: &Document, b: &Document) -> Ordering {
    if (a.relevance - b.relevance).abs() < config::RELEVANCE_EPSILON {
        b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id))
    } else {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Truncating integer mean of the sample; 0 when the sample is empty.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
