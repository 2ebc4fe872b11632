//! Inverted and forward indices.
//!
//! The [`InvertedIndex`] maps each word to its postings: the documents the
//! word occurs in, with the word's term frequency in each. The
//! [`ForwardIndex`] is the inverse view, mapping each document to its
//! word-frequency map; removal and per-document frequency reporting go
//! through it. The engine keeps the two symmetric: every `(word, id, tf)`
//! posting has a matching `(id, word, tf)` forward entry.

use crate::document::DocumentId;
use std::collections::{BTreeMap, HashMap};

/// Postings for one word: document id to term frequency, ordered by id.
pub type Postings = BTreeMap<DocumentId, f64>;

/// Word-frequency map of one document, ordered by word.
pub type WordFrequencies = BTreeMap<String, f64>;

/// Maps each indexed word to the documents containing it.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
}

impl InvertedIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the term frequency of `word` in document `id`,
    /// creating the posting at 0.0 if absent.
    pub fn accumulate(&mut self, word: &str, id: DocumentId, delta: f64) {
        *self
            .postings
            .entry(word.to_string())
            .or_default()
            .entry(id)
            .or_insert(0.0) += delta;
    }

    /// Postings list for `word`, or `None` when the word is not indexed.
    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.postings.get(word)
    }

    /// Returns `true` when document `id` contains `word`.
    pub fn contains(&self, word: &str, id: DocumentId) -> bool {
        self.postings
            .get(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Number of documents `word` occurs in.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, Postings::len)
    }

    /// Removes the posting of document `id` under `word`; drops the word
    /// entirely when its postings list becomes empty.
    pub fn erase(&mut self, word: &str, id: DocumentId) {
        if let Some(postings) = self.postings.get_mut(word) {
            postings.remove(&id);
            if postings.is_empty() {
                self.postings.remove(word);
            }
        }
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterates every indexed word with its postings list.
    pub fn words(&self) -> impl Iterator<Item = (&str, &Postings)> {
        self.postings
            .iter()
            .map(|(word, postings)| (word.as_str(), postings))
    }
}

/// Maps each document to its word-frequency map.
#[derive(Debug, Default)]
pub struct ForwardIndex {
    words: HashMap<DocumentId, WordFrequencies>,
}

impl ForwardIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty entry for `id` if absent.
    ///
    /// A document whose every token is a stop word still owns a forward
    /// entry, keeping the live-id set equal to this index's key set.
    pub fn ensure_entry(&mut self, id: DocumentId) {
        self.words.entry(id).or_default();
    }

    /// Adds `delta` to the term frequency of `word` in document `id`.
    pub fn accumulate(&mut self, id: DocumentId, word: &str, delta: f64) {
        *self
            .words
            .entry(id)
            .or_default()
            .entry(word.to_string())
            .or_insert(0.0) += delta;
    }

    /// Word-frequency map of document `id`, or `None` when unknown.
    pub fn word_frequencies(&self, id: DocumentId) -> Option<&WordFrequencies> {
        self.words.get(&id)
    }

    /// Removes and returns the entry for document `id`.
    pub fn remove(&mut self, id: DocumentId) -> Option<WordFrequencies> {
        self.words.remove(&id)
    }

    /// Returns `true` when document `id` has an entry.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.words.contains_key(&id)
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when no document has an entry.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates every document entry.
    pub fn entries(&self) -> impl Iterator<Item = (DocumentId, &WordFrequencies)> {
        self.words.iter().map(|(&id, words)| (id, words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_creates_and_adds() {
        let mut index = InvertedIndex::new();
        index.accumulate("cat", 1, 0.25);
        index.accumulate("cat", 1, 0.25);
        index.accumulate("cat", 2, 0.5);
        let postings = index.postings("cat").unwrap();
        assert_eq!(postings[&1], 0.5);
        assert_eq!(postings[&2], 0.5);
        assert_eq!(index.document_frequency("cat"), 2);
    }

    #[test]
    fn test_erase_drops_empty_postings() {
        let mut index = InvertedIndex::new();
        index.accumulate("cat", 1, 0.5);
        index.accumulate("dog", 1, 0.5);
        index.accumulate("dog", 2, 0.5);
        index.erase("cat", 1);
        assert!(index.postings("cat").is_none());
        index.erase("dog", 1);
        assert_eq!(index.document_frequency("dog"), 1);
        assert_eq!(index.word_count(), 1);
    }

    #[test]
    fn test_erase_unknown_word_is_noop() {
        let mut index = InvertedIndex::new();
        index.erase("ghost", 7);
        assert_eq!(index.word_count(), 0);
    }

    #[test]
    fn test_contains() {
        let mut index = InvertedIndex::new();
        index.accumulate("cat", 1, 0.5);
        assert!(index.contains("cat", 1));
        assert!(!index.contains("cat", 2));
        assert!(!index.contains("dog", 1));
    }

    #[test]
    fn test_forward_index_roundtrip() {
        let mut index = ForwardIndex::new();
        index.accumulate(1, "cat", 0.5);
        index.accumulate(1, "city", 0.5);
        let freqs = index.word_frequencies(1).unwrap();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs["cat"], 0.5);

        let removed = index.remove(1).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(index.word_frequencies(1).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_forward_words_are_ordered() {
        let mut index = ForwardIndex::new();
        index.accumulate(1, "dog", 0.25);
        index.accumulate(1, "ant", 0.25);
        index.accumulate(1, "cat", 0.25);
        let words: Vec<&str> = index
            .word_frequencies(1)
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(words, vec!["ant", "cat", "dog"]);
    }
}
