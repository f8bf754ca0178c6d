//! Error types for lexometer-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// A statistic threshold was zero.
    #[error("invalid {name} threshold: {value} (thresholds must be positive)")]
    InvalidThreshold {
        /// Which threshold set the value belongs to.
        name: &'static str,
        /// The rejected value.
        value: u32,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building a batch or at collaborator boundaries.
///
/// The statistics engine itself never fails: a zero denominator shows up as
/// [`Score::Undefined`](crate::readability::Score::Undefined) in the row, not
/// as an error.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A batch entry is not text.
    #[error("invalid input at document {index}: {reason}")]
    InvalidInput {
        /// Zero-based position of the offending entry.
        index: usize,
        /// What was found instead of a string.
        reason: String,
    },

    /// The batch source could not be parsed.
    #[error("malformed batch: {0}")]
    MalformedBatch(#[from] serde_json::Error),

    /// An unknown regression method name was provided.
    #[error("unknown regression method: {name}. Use: {available}")]
    UnknownMethod {
        /// The method name that was requested.
        name: String,
        /// Comma-separated list of available method names.
        available: String,
    },

    /// A collaborator parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias using [`StatsError`].
pub type StatsResult<T> = Result<T, StatsError>;
