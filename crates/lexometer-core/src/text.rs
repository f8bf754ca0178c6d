//! Text counting utilities.
//!
//! Punctuation counters expect the original document. Word and letter
//! counters expect [`preprocess`](crate::preprocess::preprocess)ed text but
//! are total on any input.

use regex::Regex;
use std::sync::LazyLock;

/// A single word character (letter, digit, or underscore).
static WORD_CHAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("valid regex"));

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count word characters (`\w`).
pub fn count_letters(text: &str) -> usize {
    WORD_CHAR_PATTERN.find_iter(text).count()
}

/// Count words whose character length is at least `threshold`.
///
/// A threshold of 0 counts every word.
pub fn count_long_words(text: &str, threshold: u32) -> usize {
    let threshold = threshold as usize;
    text.split_whitespace()
        .filter(|w| w.chars().count() >= threshold)
        .count()
}

/// Count commas.
pub fn count_commas(text: &str) -> usize {
    text.chars().filter(|&c| c == ',').count()
}

/// Count sentence terminators (`.`, `?`, `!`).
///
/// Every terminator counts on its own: `"Really?!"` is two.
pub fn count_sentence_terminators(text: &str) -> usize {
    text.chars().filter(|&c| is_sentence_terminator(c)).count()
}

/// Count characters (Unicode scalar values).
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Split text into lines, dropping blank ones.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into paragraphs (separated by blank lines).
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = "this is test sentence number with a comma ";

    #[test]
    fn words_and_letters() {
        assert_eq!(count_words(CLEAN), 8);
        assert_eq!(count_letters(CLEAN), 34);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_letters("   "), 0);
    }

    #[test]
    fn letters_include_underscores() {
        assert_eq!(count_letters("snake_case"), 10);
    }

    #[test]
    fn long_words_by_threshold() {
        assert_eq!(count_long_words(CLEAN, 0), 8);
        assert_eq!(count_long_words(CLEAN, 3), 6);
        assert_eq!(count_long_words(CLEAN, 5), 3);
        assert_eq!(count_long_words(CLEAN, 8), 1);
        assert_eq!(count_long_words(CLEAN, 10), 0);
    }

    #[test]
    fn long_words_count_chars_not_bytes() {
        // "über" is 4 characters but 5 bytes.
        assert_eq!(count_long_words("über", 5), 0);
        assert_eq!(count_long_words("über", 4), 1);
    }

    #[test]
    fn long_words_non_increasing_in_threshold() {
        let text = "internationalization is a remarkably long word for a short sentence";
        let counts: Vec<usize> = (0..=25).map(|t| count_long_words(text, t)).collect();
        assert!(
            counts.windows(2).all(|w| w[0] >= w[1]),
            "not monotone: {counts:?}"
        );
    }

    #[test]
    fn punctuation_counts() {
        let raw = "This is test-sentence number 1 with a comma ,.";
        assert_eq!(count_commas(raw), 1);
        assert_eq!(count_sentence_terminators(raw), 1);
    }

    #[test]
    fn repeated_terminators_each_count() {
        assert_eq!(count_sentence_terminators("What?!?! No..."), 7);
        assert_eq!(count_sentence_terminators("no punctuation"), 0);
    }

    #[test]
    fn chars_are_scalar_values() {
        assert_eq!(count_chars("Ärger"), 5);
        assert_eq!(count_chars(""), 0);
    }

    #[test]
    fn split_lines_skips_blank() {
        let lines = split_lines("first line\n\n  \nsecond line\r\nthird");
        assert_eq!(lines, vec!["first line", "second line", "third"]);
    }

    #[test]
    fn split_paragraphs_basic() {
        let text = "First paragraph.\n\nSecond paragraph.\r\n\r\nThird.";
        let paras = split_paragraphs(text);
        assert_eq!(paras, vec!["First paragraph.", "Second paragraph.", "Third."]);
    }
}
