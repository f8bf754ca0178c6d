//! Heuristic syllable counting from character patterns alone.
//!
//! Each run of vowels that is preceded by a consonant counts as one syllable
//! nucleus. The word is scanned right to left, and a leading consonant cluster
//! of two or more characters takes one syllable back off. No dictionary is
//! consulted, so the counts are estimates. For example, "sentence" gets 3.
//!
//! Input is expected to be [`preprocess`](crate::preprocess::preprocess)ed:
//! vowels are matched in lowercase only.

/// Characters treated as syllable nuclei.
pub const VOWELS: [char; 9] = ['a', 'e', 'i', 'o', 'u', 'y', 'ä', 'ö', 'ü'];

/// Whether `c` is in [`VOWELS`].
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Count the syllables in a single preprocessed word.
///
/// The result is not floored at 1. A word longer than two characters that
/// opens with two or more non-vowels loses one syllable, so a vowelless word
/// such as `"str"` scores 0.
pub fn count_word_syllables(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let mut syllables = 1;

    let mut pos = chars.len();
    while pos > 0 {
        pos -= 1;
        if !is_vowel(chars[pos]) {
            continue;
        }
        // The vowel at index 1 ends the scan without looking at index 0.
        if pos <= 1 {
            break;
        }
        pos -= 1;
        if !is_vowel(chars[pos]) {
            syllables += 1;
        }
    }

    let leading_consonants = chars.iter().take_while(|c| !is_vowel(**c)).count();
    if leading_consonants >= 2 && chars.len() > 2 {
        syllables -= 1;
    }

    syllables
}

/// Per-word syllable counts for whitespace-separated words, in order.
pub fn word_syllable_counts(text: &str) -> Vec<usize> {
    text.split_whitespace().map(count_word_syllables).collect()
}

/// Preprocess raw `text` and pair each resulting word with its count.
pub fn word_syllables(text: &str) -> Vec<(String, usize)> {
    crate::preprocess::preprocess(text)
        .split_whitespace()
        .map(|word| (word.to_string(), count_word_syllables(word)))
        .collect()
}

/// Total syllables across all words.
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace().map(count_word_syllables).sum()
}

/// Number of words with exactly one syllable.
pub fn count_monosyllables(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| count_word_syllables(w) == 1)
        .count()
}

/// Number of words with at least `threshold` syllables.
pub fn count_polysyllables(text: &str, threshold: u32) -> usize {
    let threshold = threshold as usize;
    text.split_whitespace()
        .filter(|w| count_word_syllables(w) >= threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTENCE: &str = "this is test sentence number with a comma ";

    #[test]
    fn hand_traced_words() {
        for (word, expected) in [
            ("homomorphism", 4),
            ("a", 1),
            ("is", 1),
            ("with", 1),
            ("test", 1),
            ("the", 1),
            ("this", 1),
            ("comma", 2),
            ("number", 2),
            ("sentence", 3),
        ] {
            assert_eq!(count_word_syllables(word), expected, "word {word:?}");
        }
    }

    #[test]
    fn single_letters_have_one_syllable() {
        for word in ["a", "e", "x", "z", "ü", "_"] {
            assert_eq!(count_word_syllables(word), 1, "word {word:?}");
        }
    }

    #[test]
    fn vowel_at_second_position_ends_scan() {
        // "ba": the 'a' sits at index 1, so no boundary is counted.
        assert_eq!(count_word_syllables("ba"), 1);
        // "bab" reaches 'a' the same way.
        assert_eq!(count_word_syllables("bab"), 1);
    }

    #[test]
    fn consecutive_vowels_form_one_nucleus() {
        // b-oa-t: the 'a' is preceded by a vowel, so no increment.
        assert_eq!(count_word_syllables("boat"), 1);
        // "beautiful": ful, ti, beau.
        assert_eq!(count_word_syllables("beautiful"), 3);
    }

    #[test]
    fn leading_cluster_correction_is_not_floored() {
        assert_eq!(count_word_syllables("str"), 0);
        assert_eq!(count_word_syllables("hmm"), 0);
        // Two characters are exempt from the correction.
        assert_eq!(count_word_syllables("hm"), 1);
    }

    #[test]
    fn leading_cluster_cancels_single_nucleus() {
        // One vowel run after a two-consonant opening nets zero.
        for word in ["three", "spoon", "street", "green", "trees", "stood"] {
            assert_eq!(count_word_syllables(word), 0, "word {word:?}");
        }
        // A second nucleus survives the correction.
        assert_eq!(count_word_syllables("student"), 2);
    }

    #[test]
    fn word_syllables_preprocesses_raw_text() {
        assert_eq!(
            word_syllables("Test-Sentence 42, homomorphism!"),
            vec![
                ("test".to_string(), 1),
                ("sentence".to_string(), 3),
                ("homomorphism".to_string(), 4),
            ]
        );
        assert!(word_syllables("1234 ,.").is_empty());
    }

    #[test]
    fn latin1_vowels_count() {
        // m-ü-d-e: 'e' preceded by 'd' adds one, 'ü' at index 1 stops.
        assert_eq!(count_word_syllables("müde"), 2);
    }

    #[test]
    fn document_wrappers() {
        assert_eq!(count_syllables(SENTENCE), 12);
        assert_eq!(count_monosyllables(SENTENCE), 5);
        assert_eq!(count_polysyllables(SENTENCE, 2), 3);
        assert_eq!(count_polysyllables(SENTENCE, 3), 1);
        assert_eq!(count_polysyllables(SENTENCE, 5), 0);
        assert_eq!(
            word_syllable_counts(SENTENCE),
            vec![1, 1, 1, 3, 2, 1, 1, 2]
        );
    }

    #[test]
    fn empty_text_has_no_syllables() {
        assert_eq!(count_syllables(""), 0);
        assert_eq!(count_monosyllables("   "), 0);
        assert_eq!(count_polysyllables("", 1), 0);
    }

    #[test]
    fn polysyllables_non_increasing_in_threshold() {
        let text = "the internationalization of homomorphism theory is remarkably complicated";
        let counts: Vec<usize> = (1..=8).map(|t| count_polysyllables(text, t)).collect();
        assert!(
            counts.windows(2).all(|w| w[0] >= w[1]),
            "not monotone: {counts:?}"
        );
    }

    #[test]
    fn mono_and_polysyllables_partition_words() {
        for text in [
            SENTENCE,
            "the quick brown fox jumps over the lazy dog",
            "readability statistics are computed per document",
        ] {
            let words = text.split_whitespace().count();
            assert_eq!(
                count_monosyllables(text) + count_polysyllables(text, 2),
                words,
                "partition failed for {text:?}"
            );
        }
    }
}
