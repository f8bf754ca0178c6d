//! Text normalization applied before any word-level statistic.
//!
//! The normalized form is lowercase with digits and punctuation removed,
//! hyphens turned into spaces, and whitespace runs collapsed to one space.
//! Punctuation-based statistics (commas, sentence terminators) must be taken
//! from the original text, since this step removes what they count.

use regex::Regex;
use std::sync::LazyLock;

/// Any decimal digit.
static DIGIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));

/// Anything that is neither a word character nor whitespace.
static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// A run of whitespace.
static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a document for word, letter, and syllable counting.
///
/// Steps, in order: lowercase, drop digits, replace `-` with a space, drop
/// remaining non-word symbols, collapse whitespace. Leading and trailing
/// whitespace is collapsed but not trimmed.
///
/// Never fails, and `preprocess(&preprocess(s)) == preprocess(s)`.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_digits = DIGIT_PATTERN.replace_all(&lowered, "");
    let dehyphenated = no_digits.replace('-', " ");
    let no_symbols = SYMBOL_PATTERN.replace_all(&dehyphenated, "");
    WHITESPACE_PATTERN
        .replace_all(&no_symbols, " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sentence() {
        assert_eq!(
            preprocess("This is test-sentence number 1 with a comma ,."),
            "this is test sentence number with a comma "
        );
    }

    #[test]
    fn collapses_whitespace_and_strips_punctuation() {
        assert_eq!(
            preprocess("This is    test-sentence    number ?!?! 2 with more numbers 21353215."),
            "this is test sentence number with more numbers "
        );
    }

    #[test]
    fn keeps_leading_space() {
        assert_eq!(preprocess("  Hello\t\nWorld"), " hello world");
    }

    #[test]
    fn empty_input() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("   "), " ");
        assert_eq!(preprocess("12345 !!!"), " ");
    }

    #[test]
    fn keeps_latin1_vowels_and_underscores() {
        assert_eq!(preprocess("Über_Größe Ärger"), "über_größe ärger");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "This is test-sentence number 1 with a comma ,.",
            "  --double--hyphen--  ",
            "Mixed CASE, digits 42, and symbols: $%^&*()!",
            "tabs\tand\nnewlines\r\n  everywhere",
            "Äpfel, Öl & Übermut -- 3 Zeilen.",
            "snake_case_word and CamelCase",
        ];
        for sample in samples {
            let once = preprocess(sample);
            assert_eq!(preprocess(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn output_alphabet() {
        let samples = [
            "Hello, World! 2024-01-01 is a date.",
            "What?!?! No... way -- really?",
            "Ärger über Öl: 100% sicher_heit.",
            "  a  b\t\tc\n\nd  ",
        ];
        for sample in samples {
            let out = preprocess(sample);
            assert!(!out.contains("  "), "double space in {out:?}");
            assert!(!out.contains('-'), "hyphen in {out:?}");
            assert!(
                out.chars()
                    .all(|c| c == ' ' || c == '_' || (c.is_alphabetic() && !c.is_uppercase())),
                "unexpected character in {out:?}"
            );
        }
    }
}
