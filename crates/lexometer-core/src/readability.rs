//! Composite readability scores.
//!
//! Every score is computed from per-document counts, never from the text
//! itself. A score whose formula would divide by zero is
//! [`Score::Undefined`] rather than an error or a zero.
//!
//! Flesch family (W = words, S = sentences, Y = syllables, M = monosyllables):
//!
//! - Reading Ease: `206.835 - 1.015 * (W/S) - 84.6 * (Y/W)`
//! - Flesch-Kincaid Grade Level: `0.39 * (W/S) + 11.8 * (Y/W) - 15.59`
//! - Modified Flesch: `1.599 * (100 * M/W) - 1.015 * (W/S) - 31.517`

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A readability score, or the marker for one that cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// A computed score.
    Value(f64),
    /// The formula's denominator was zero for this document.
    Undefined,
}

impl Score {
    /// The computed value, if any.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Whether this is the undefined-score marker.
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The value as a float, with `NaN` standing in for [`Score::Undefined`].
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Value(v) => v,
            Self::Undefined => f64::NAN,
        }
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
            Self::Undefined => f.write_str("NaN"),
        }
    }
}

/// Serialized as a number, or `null` when undefined.
impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(Self::from)
    }
}

/// Per-document counts that composite scores are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    /// Sentence-terminator count.
    pub sentences: usize,
    /// Word count.
    pub words: usize,
    /// Total syllables.
    pub syllables: usize,
    /// Words with exactly one syllable.
    pub monosyllables: usize,
    /// Words with three or more syllables.
    pub complex_words: usize,
    /// Word characters.
    pub letters: usize,
}

impl ScoreInputs {
    fn words_per_sentence(&self) -> Option<f64> {
        ratio(self.words, self.sentences)
    }

    fn syllables_per_word(&self) -> Option<f64> {
        ratio(self.syllables, self.words)
    }
}

/// `numerator / denominator`, or `None` when the denominator is zero.
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator != 0).then(|| numerator as f64 / denominator as f64)
}

/// Flesch Reading Ease. Higher is easier.
pub fn flesch_reading_ease(inputs: &ScoreInputs) -> Score {
    let wps = inputs.words_per_sentence();
    let spw = inputs.syllables_per_word();
    wps.zip(spw)
        .map(|(wps, spw)| 84.6f64.mul_add(-spw, 1.015f64.mul_add(-wps, 206.835)))
        .into()
}

/// Flesch-Kincaid Grade Level. Approximates a US school grade.
pub fn flesch_grade_level(inputs: &ScoreInputs) -> Score {
    let wps = inputs.words_per_sentence();
    let spw = inputs.syllables_per_word();
    wps.zip(spw)
        .map(|(wps, spw)| 0.39f64.mul_add(wps, 11.8 * spw) - 15.59)
        .into()
}

/// Modified Flesch score, driven by the share of monosyllabic words.
pub fn flesch_modified(inputs: &ScoreInputs) -> Score {
    let wps = inputs.words_per_sentence();
    let mono = ratio(inputs.monosyllables * 100, inputs.words);
    wps.zip(mono)
        .map(|(wps, mono)| 1.599f64.mul_add(mono, -1.015 * wps) - 31.517)
        .into()
}

/// Automated Readability Index: `4.71 * (L/W) + 0.5 * (W/S) - 21.43`.
pub fn automated_readability_index(inputs: &ScoreInputs) -> Score {
    let lpw = ratio(inputs.letters, inputs.words);
    let wps = inputs.words_per_sentence();
    lpw.zip(wps)
        .map(|(lpw, wps)| 4.71f64.mul_add(lpw, 0.5 * wps) - 21.43)
        .into()
}

/// Coleman-Liau index: `0.0588 * L - 0.296 * S - 15.8`, where L and S are
/// letters and sentences per 100 words.
pub fn coleman_liau(inputs: &ScoreInputs) -> Score {
    let letters = ratio(inputs.letters * 100, inputs.words);
    let sentences = ratio(inputs.sentences * 100, inputs.words);
    letters
        .zip(sentences)
        .map(|(l, s)| 0.0588f64.mul_add(l, -0.296 * s) - 15.8)
        .into()
}

/// Gunning fog index: `0.4 * (W/S + 100 * C/W)`, C = words of 3+ syllables.
pub fn gunning_fog(inputs: &ScoreInputs) -> Score {
    let wps = inputs.words_per_sentence();
    let complex = ratio(inputs.complex_words * 100, inputs.words);
    wps.zip(complex)
        .map(|(wps, complex)| 0.4 * (wps + complex))
        .into()
}

/// SMOG index: `1.043 * sqrt(C * 30 / S) + 3.1291`.
pub fn smog_index(inputs: &ScoreInputs) -> Score {
    ratio(inputs.complex_words * 30, inputs.sentences)
        .map(|per_30| 1.043f64.mul_add(per_30.sqrt(), 3.1291))
        .into()
}

/// Linsear Write: `r = (E + 3 * C) / S` over easy words E (under 3
/// syllables) and complex words C, then `r / 2` if `r > 20`, else `r / 2 - 1`.
pub fn linsear_write(inputs: &ScoreInputs) -> Score {
    let easy = inputs.words.saturating_sub(inputs.complex_words);
    ratio(easy + 3 * inputs.complex_words, inputs.sentences)
        .map(|r| if r > 20.0 { r / 2.0 } else { r / 2.0 - 1.0 })
        .into()
}

/// The three Flesch-family scores for one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleschScores {
    /// Flesch Reading Ease.
    pub reading_ease: Score,
    /// Flesch-Kincaid Grade Level.
    pub grade_level: Score,
    /// Modified Flesch.
    pub modified: Score,
}

impl FleschScores {
    /// Compute all three from the same counts.
    pub fn compute(inputs: &ScoreInputs) -> Self {
        Self {
            reading_ease: flesch_reading_ease(inputs),
            grade_level: flesch_grade_level(inputs),
            modified: flesch_modified(inputs),
        }
    }
}

/// Additional indices, reported when extended scores are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedScores {
    /// Automated Readability Index.
    pub automated_readability_index: Score,
    /// Coleman-Liau index.
    pub coleman_liau: Score,
    /// Gunning fog index.
    pub gunning_fog: Score,
    /// SMOG index.
    pub smog_index: Score,
    /// Linsear Write.
    pub linsear_write: Score,
}

impl ExtendedScores {
    /// Compute all extended indices from the same counts.
    pub fn compute(inputs: &ScoreInputs) -> Self {
        Self {
            automated_readability_index: automated_readability_index(inputs),
            coleman_liau: coleman_liau(inputs),
            gunning_fog: gunning_fog(inputs),
            smog_index: smog_index(inputs),
            linsear_write: linsear_write(inputs),
        }
    }
}
