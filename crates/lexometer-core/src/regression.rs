//! Boundary to regression model fitting.
//!
//! Training lives outside this crate. What is fixed here is the set of
//! method names a fitter must understand and the shape of its input: the
//! dense matrix from [`FeatureTable::to_matrix`](crate::statistics::FeatureTable::to_matrix)
//! plus one label per row.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Regression methods a [`Regressor`] may be asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RegressionMethod {
    /// Ordinary least squares.
    #[default]
    Linear,
    /// L1-regularized linear regression.
    Lasso,
    /// L2-regularized linear regression.
    Ridge,
    /// Combined L1/L2 regularization.
    ElasticNet,
    /// Random forest regressor.
    RandomForest,
}

impl RegressionMethod {
    /// Every method, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::Lasso,
        Self::Ridge,
        Self::ElasticNet,
        Self::RandomForest,
    ];

    /// Returns the method name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Lasso => "lasso",
            Self::Ridge => "ridge",
            Self::ElasticNet => "elastic-net",
            Self::RandomForest => "random-forest",
        }
    }
}

impl std::fmt::Display for RegressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegressionMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| StatsError::UnknownMethod {
                name: s.to_string(),
                available: Self::ALL.map(|m| m.as_str()).join(", "),
            })
    }
}

/// Something that can fit a regression model to a feature matrix.
///
/// `features` is row-major with one row per document. Undefined scores are
/// `NaN`; imputing them is the implementation's job.
pub trait Regressor {
    /// The fitted model handle.
    type Model;
    /// Failure while fitting.
    type Error;

    /// Fit a model of the given kind.
    fn fit(
        &self,
        features: &[Vec<f64>],
        labels: &[f64],
        method: RegressionMethod,
    ) -> Result<Self::Model, Self::Error>;
}
