//! Whitespace tokenizer.
//!
//! Splits text on the ASCII space character only. Tabs, newlines, and any
//! other byte are ordinary token content. Output slices borrow from the
//! input buffer; nothing is copied or normalized.

/// Splits `text` into space-delimited tokens.
///
/// Runs of spaces separate tokens, leading and trailing spaces are skipped,
/// and a final token without a trailing space is included. Empty input
/// yields an empty iterator.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        split_words(text).collect()
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(words("cat in the city"), vec!["cat", "in", "the", "city"]);
    }

    #[test]
    fn test_space_runs_and_edges() {
        assert_eq!(words("  cat   city "), vec!["cat", "city"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_final_token_without_trailing_space() {
        assert_eq!(words("one two"), vec!["one", "two"]);
    }

    #[test]
    fn test_only_ascii_space_separates() {
        // Tabs and newlines are token content, not separators.
        assert_eq!(words("a\tb c\nd"), vec!["a\tb", "c\nd"]);
    }

    #[test]
    fn test_slices_borrow_from_input() {
        let text = String::from("alpha beta");
        let tokens = words(&text);
        assert_eq!(tokens[0].as_ptr(), text.as_ptr());
    }
}
