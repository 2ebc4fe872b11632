//! Stop-word set.
//!
//! Words in the set are excluded from indexing and from parsed queries.
//! The set is ordered by the words' bytes and rejects words carrying
//! control characters at construction time.

use crate::error::SearchError;
use crate::tokenizer::split_words;
use std::collections::BTreeSet;

/// Returns `true` when `word` contains no control byte (value below 0x20).
///
/// Applied to stop words, indexed words, and query words alike.
pub(crate) fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|b| b >= 0x20)
}

/// An ordered set of words excluded from both indexing and query parsing.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Builds the set from a single space-delimited string.
    pub fn from_text(text: &str) -> Result<Self, SearchError> {
        Self::from_words(split_words(text))
    }

    /// Builds the set from any iterable of words.
    ///
    /// Duplicates and empty entries are silently dropped; a word containing
    /// a control character fails the whole construction.
    pub fn from_words<I, S>(words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Returns `true` when `word` is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_and_dedups() {
        let set = StopWordSet::from_text("in the in  the").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("in"));
        assert!(set.contains("the"));
        assert!(!set.contains("cat"));
    }

    #[test]
    fn test_from_words_drops_empties() {
        let set = StopWordSet::from_words(["in", "", "the"]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_control_character_rejected() {
        let err = StopWordSet::from_words(["in", "th\u{1}e"]).unwrap_err();
        assert_eq!(err, SearchError::InvalidWord("th\u{1}e".to_string()));
    }

    #[test]
    fn test_empty_set() {
        let set = StopWordSet::from_text("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("city"));
        assert!(is_valid_word("non-ascii-\u{43f}\u{43e}\u{438}\u{441}\u{43a}"));
        assert!(!is_valid_word("ta\tb"));
        assert!(!is_valid_word("new\nline"));
    }
}
