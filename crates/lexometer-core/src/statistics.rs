//! Per-document feature rows and batch aggregation.
//!
//! Each document is handled independently:
//!
//! 1. Raw counts (`num_comma`, `num_sentences`) on the original text.
//! 2. [`preprocess`] the text.
//! 3. Word, letter, syllable, and length counts on the cleaned text. The
//!    syllable heuristic runs once per word.
//! 4. Composite scores from those counts.
//!
//! Batches run on the rayon pool by default. Rows are collected by index, so
//! row `i` is always document `i`.

use rayon::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::error::{ConfigError, ConfigResult};
use crate::preprocess::preprocess;
use crate::readability::{ExtendedScores, FleschScores, Score, ScoreInputs};
use crate::syllables;
use crate::text;

/// Syllable thresholds used when none are configured.
pub const DEFAULT_POLYSYLLABLE_THRESHOLDS: &[u32] = &[2, 3, 5];

/// Word-length thresholds used when none are configured.
pub const DEFAULT_LONG_WORD_THRESHOLDS: &[u32] = &[3, 5, 8, 10, 15];

/// Syllable count at which a word is "complex" for fog, SMOG, and Linsear Write.
const COMPLEX_WORD_SYLLABLES: usize = 3;

/// Whether a batch is spread across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Evaluate documents on the rayon thread pool.
    #[default]
    Parallel,
    /// Evaluate documents one after another on the calling thread.
    Sequential,
}

/// Which statistics to compute. Fixes the column set of a [`FeatureTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsConfig {
    polysyllable_thresholds: Vec<u32>,
    long_word_thresholds: Vec<u32>,
    extended_scores: bool,
    execution: Execution,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            polysyllable_thresholds: DEFAULT_POLYSYLLABLE_THRESHOLDS.to_vec(),
            long_word_thresholds: DEFAULT_LONG_WORD_THRESHOLDS.to_vec(),
            extended_scores: false,
            execution: Execution::Parallel,
        }
    }
}

impl StatisticsConfig {
    /// Build a config from threshold sets.
    ///
    /// Thresholds are sorted and deduplicated. Zero is rejected.
    pub fn new<P, L>(polysyllable_thresholds: P, long_word_thresholds: L) -> ConfigResult<Self>
    where
        P: IntoIterator<Item = u32>,
        L: IntoIterator<Item = u32>,
    {
        Ok(Self {
            polysyllable_thresholds: normalize_thresholds("polysyllable", polysyllable_thresholds)?,
            long_word_thresholds: normalize_thresholds("long-word", long_word_thresholds)?,
            ..Self::default()
        })
    }

    /// Also compute `num_char` and the extended indices.
    #[must_use]
    pub const fn with_extended_scores(mut self, enabled: bool) -> Self {
        self.extended_scores = enabled;
        self
    }

    /// Choose parallel or sequential evaluation.
    #[must_use]
    pub const fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Syllable thresholds, ascending.
    pub fn polysyllable_thresholds(&self) -> &[u32] {
        &self.polysyllable_thresholds
    }

    /// Word-length thresholds, ascending.
    pub fn long_word_thresholds(&self) -> &[u32] {
        &self.long_word_thresholds
    }

    /// Whether extended scores are computed.
    pub const fn extended_scores(&self) -> bool {
        self.extended_scores
    }

    /// How batches are evaluated.
    pub const fn execution(&self) -> Execution {
        self.execution
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<String> {
        let mut columns: Vec<String> = [
            "num_comma",
            "num_sentences",
            "num_words",
            "num_letters",
            "num_syllables",
            "num_monosyllables",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        columns.extend(
            self.polysyllable_thresholds
                .iter()
                .map(|t| format!("num_polysyllables_{t}")),
        );
        columns.extend(
            self.long_word_thresholds
                .iter()
                .map(|t| format!("num_long_{t}")),
        );
        columns.extend(
            ["flesch_reading_ease", "flesch_grade_level", "flesch_modified"]
                .iter()
                .map(|s| s.to_string()),
        );
        if self.extended_scores {
            columns.extend(
                [
                    "num_char",
                    "automated_readability_index",
                    "coleman_liau",
                    "gunning_fog",
                    "smog_index",
                    "linsear_write",
                ]
                .iter()
                .map(|s| s.to_string()),
            );
        }
        columns
    }
}

fn normalize_thresholds<I>(name: &'static str, values: I) -> ConfigResult<Vec<u32>>
where
    I: IntoIterator<Item = u32>,
{
    let mut thresholds = Vec::new();
    for value in values {
        if value == 0 {
            return Err(ConfigError::InvalidThreshold { name, value });
        }
        thresholds.push(value);
    }
    thresholds.sort_unstable();
    thresholds.dedup();
    Ok(thresholds)
}

/// One value in a feature row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// An integer count.
    Count(usize),
    /// A composite score (possibly undefined).
    Score(Score),
}

impl Cell {
    /// The value as a float; undefined scores become `NaN`.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Count(n) => n as f64,
            Self::Score(s) => s.to_f64(),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n as u64),
            Self::Score(s) => s.serialize(serializer),
        }
    }
}

/// Values that only appear with extended scores enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedFeatures {
    /// Characters in the original document.
    pub num_char: usize,
    /// Extended indices.
    pub scores: ExtendedScores,
}

/// Statistics for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Commas in the original text.
    pub num_comma: usize,
    /// `.`, `?`, and `!` in the original text.
    pub num_sentences: usize,
    /// Words after preprocessing.
    pub num_words: usize,
    /// Word characters after preprocessing.
    pub num_letters: usize,
    /// Total heuristic syllables.
    pub num_syllables: usize,
    /// Words with exactly one syllable.
    pub num_monosyllables: usize,
    /// `(threshold, words with at least that many syllables)`, ascending.
    pub polysyllables: Vec<(u32, usize)>,
    /// `(threshold, words with at least that many characters)`, ascending.
    pub long_words: Vec<(u32, usize)>,
    /// Flesch-family scores.
    pub flesch: FleschScores,
    /// Present when extended scores are enabled.
    pub extended: Option<ExtendedFeatures>,
}

impl FeatureRow {
    /// Words with at least `threshold` syllables, if that threshold was configured.
    pub fn polysyllables(&self, threshold: u32) -> Option<usize> {
        lookup(&self.polysyllables, threshold)
    }

    /// Words with at least `threshold` characters, if that threshold was configured.
    pub fn long_words(&self, threshold: u32) -> Option<usize> {
        lookup(&self.long_words, threshold)
    }

    /// Every `(column, value)` pair, in column order.
    pub fn cells(&self) -> Vec<(String, Cell)> {
        let mut cells = vec![
            ("num_comma".to_string(), Cell::Count(self.num_comma)),
            ("num_sentences".to_string(), Cell::Count(self.num_sentences)),
            ("num_words".to_string(), Cell::Count(self.num_words)),
            ("num_letters".to_string(), Cell::Count(self.num_letters)),
            ("num_syllables".to_string(), Cell::Count(self.num_syllables)),
            (
                "num_monosyllables".to_string(),
                Cell::Count(self.num_monosyllables),
            ),
        ];
        cells.extend(
            self.polysyllables
                .iter()
                .map(|(t, n)| (format!("num_polysyllables_{t}"), Cell::Count(*n))),
        );
        cells.extend(
            self.long_words
                .iter()
                .map(|(t, n)| (format!("num_long_{t}"), Cell::Count(*n))),
        );
        cells.push((
            "flesch_reading_ease".to_string(),
            Cell::Score(self.flesch.reading_ease),
        ));
        cells.push((
            "flesch_grade_level".to_string(),
            Cell::Score(self.flesch.grade_level),
        ));
        cells.push((
            "flesch_modified".to_string(),
            Cell::Score(self.flesch.modified),
        ));
        if let Some(ext) = &self.extended {
            cells.push(("num_char".to_string(), Cell::Count(ext.num_char)));
            cells.push((
                "automated_readability_index".to_string(),
                Cell::Score(ext.scores.automated_readability_index),
            ));
            cells.push((
                "coleman_liau".to_string(),
                Cell::Score(ext.scores.coleman_liau),
            ));
            cells.push((
                "gunning_fog".to_string(),
                Cell::Score(ext.scores.gunning_fog),
            ));
            cells.push(("smog_index".to_string(), Cell::Score(ext.scores.smog_index)));
            cells.push((
                "linsear_write".to_string(),
                Cell::Score(ext.scores.linsear_write),
            ));
        }
        cells
    }

    /// Look up a single column by name.
    pub fn get(&self, column: &str) -> Option<Cell> {
        self.cells()
            .into_iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }
}

fn lookup(pairs: &[(u32, usize)], threshold: u32) -> Option<usize> {
    pairs
        .iter()
        .find(|(t, _)| *t == threshold)
        .map(|(_, n)| *n)
}

/// Serialized as a flat map from column name to number (or `null`).
impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells = self.cells();
        let mut map = serializer.serialize_map(Some(cells.len()))?;
        for (name, cell) in &cells {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Rows for a whole batch, sharing one column set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, aligned with the input batch.
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dense numeric matrix in column order, `NaN` for undefined scores.
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| {
                row.cells()
                    .into_iter()
                    .map(|(_, cell)| cell.to_f64())
                    .collect()
            })
            .collect()
    }
}

/// Compute every configured statistic for one document.
pub fn compute_row(document: &str, config: &StatisticsConfig) -> FeatureRow {
    let num_comma = text::count_commas(document);
    let num_sentences = text::count_sentence_terminators(document);

    let cleaned = preprocess(document);
    let per_word = syllables::word_syllable_counts(&cleaned);

    let num_words = per_word.len();
    let num_letters = text::count_letters(&cleaned);
    let num_syllables = per_word.iter().sum();
    let num_monosyllables = per_word.iter().filter(|&&s| s == 1).count();
    let at_least = |min: usize| per_word.iter().filter(|&&s| s >= min).count();

    let polysyllables = config
        .polysyllable_thresholds
        .iter()
        .map(|&t| (t, at_least(t as usize)))
        .collect();
    let long_words = config
        .long_word_thresholds
        .iter()
        .map(|&t| (t, text::count_long_words(&cleaned, t)))
        .collect();

    let inputs = ScoreInputs {
        sentences: num_sentences,
        words: num_words,
        syllables: num_syllables,
        monosyllables: num_monosyllables,
        complex_words: at_least(COMPLEX_WORD_SYLLABLES),
        letters: num_letters,
    };

    let extended = config.extended_scores.then(|| ExtendedFeatures {
        num_char: text::count_chars(document),
        scores: ExtendedScores::compute(&inputs),
    });

    FeatureRow {
        num_comma,
        num_sentences,
        num_words,
        num_letters,
        num_syllables,
        num_monosyllables,
        polysyllables,
        long_words,
        flesch: FleschScores::compute(&inputs),
        extended,
    }
}

/// Compute a feature table for a batch.
pub fn compute_statistics(batch: &Batch, config: &StatisticsConfig) -> FeatureTable {
    compute_statistics_with(batch, config, || {})
}

/// Compute a feature table, calling `on_row` once as each row finishes.
///
/// `on_row` may run on worker threads and in any order; the table itself is
/// always in input order.
#[tracing::instrument(skip_all, fields(documents = batch.len(), execution = ?config.execution))]
pub fn compute_statistics_with<F>(
    batch: &Batch,
    config: &StatisticsConfig,
    on_row: F,
) -> FeatureTable
where
    F: Fn() + Sync,
{
    let row = |doc: &String| {
        let row = compute_row(doc, config);
        on_row();
        row
    };

    let rows: Vec<FeatureRow> = match config.execution {
        Execution::Parallel => batch.documents().par_iter().map(row).collect(),
        Execution::Sequential => batch.documents().iter().map(row).collect(),
    };

    let undefined = rows
        .iter()
        .filter(|r| r.flesch.reading_ease.is_undefined())
        .count();
    tracing::debug!(rows = rows.len(), undefined, "statistics computed");

    FeatureTable {
        columns: config.column_names(),
        rows,
    }
}
