//! Query parsing.
//!
//! A raw query is split into plus-words and minus-words. A leading `-`
//! marks a minus-word: documents containing any minus-word are excluded
//! from results. Stop words are dropped from both lists. The parsed lists
//! are sorted and deduplicated and borrow from the raw query text.

use crate::error::SearchError;
use crate::stopwords::{is_valid_word, StopWordSet};
use crate::tokenizer::split_words;

/// A parsed query: disjoint, sorted, deduplicated word lists borrowing
/// from the raw query string.
///
/// The parser does not cross-check the lists against each other; a query
/// like `foo -foo` keeps the word in both, and ranking excludes the
/// documents it would otherwise score.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    /// Words a document should contain to be scored.
    pub plus_words: Vec<&'a str>,
    /// Words whose presence excludes a document.
    pub minus_words: Vec<&'a str>,
}

impl<'a> Query<'a> {
    /// Parses `text` against the given stop-word set.
    ///
    /// Fails on tokens containing control bytes, on a lone `-`, and on
    /// tokens starting with `--`.
    pub fn parse(text: &'a str, stop_words: &StopWordSet) -> Result<Self, SearchError> {
        let mut query = Query::default();
        for token in split_words(text) {
            if !is_valid_word(token) {
                return Err(SearchError::InvalidWord(token.to_string()));
            }
            let (word, is_minus) = parse_query_word(token)?;
            if stop_words.contains(word) {
                continue;
            }
            if is_minus {
                query.minus_words.push(word);
            } else {
                query.plus_words.push(word);
            }
        }
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
        Ok(query)
    }

    /// Returns `true` when neither list contains a word.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

/// Classifies one token, stripping the minus marker.
fn parse_query_word(token: &str) -> Result<(&str, bool), SearchError> {
    if token == "-" || token.starts_with("--") {
        return Err(SearchError::MalformedQuery(token.to_string()));
    }
    match token.strip_prefix('-') {
        Some(rest) => Ok((rest, true)),
        None => Ok((token, false)),
    }
}
