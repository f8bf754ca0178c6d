//! Core library for lexometer.
//!
//! Turns batches of documents into rows of readability statistics: counts of
//! words, letters, and syllables, threshold columns for polysyllabic and long
//! words, and Flesch scores.
//!
//! # Modules
//!
//! - [`preprocess`] - Text cleaning before word-level counts
//! - [`syllables`] - Heuristic syllable counter
//! - [`text`] - Word, letter, and punctuation counts
//! - [`readability`] - Score formulas and the undefined-score sentinel
//! - [`statistics`] - Per-document rows and batch aggregation
//! - [`batch`] - Document batches and input formats
//! - [`regression`] - Regression fitting boundary
//! - [`representation`] - Pretrained-model representation boundary
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexometer_core::{Batch, StatisticsConfig, compute_statistics};
//!
//! let batch: Batch = ["This is test-sentence number 1 with a comma ,."]
//!     .into_iter()
//!     .collect();
//! let table = compute_statistics(&batch, &StatisticsConfig::default());
//!
//! assert_eq!(table.rows()[0].num_words, 8);
//! ```
#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod error;
pub mod preprocess;
pub mod readability;
pub mod regression;
pub mod representation;
pub mod statistics;
pub mod syllables;
pub mod text;

pub use batch::{Batch, BatchFormat};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{ConfigError, ConfigResult, StatsError, StatsResult};
pub use preprocess::preprocess;
pub use readability::{ExtendedScores, FleschScores, Score};
pub use statistics::{
    Execution, FeatureRow, FeatureTable, StatisticsConfig, compute_row, compute_statistics,
    compute_statistics_with,
};
pub use syllables::{count_word_syllables, word_syllables};
