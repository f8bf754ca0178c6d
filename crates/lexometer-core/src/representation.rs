//! Boundary to pretrained-model text representations.
//!
//! Embedding extraction is done by an external model runtime. This module
//! pins down the request parameters and the returned arrays.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// How the last hidden layers are merged into one vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CombineMethod {
    /// Concatenate hidden states.
    Cat,
    /// Sum hidden states element-wise.
    #[default]
    Sum,
}

/// Parameters for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct RepresentationParams {
    /// Model family, e.g. `roberta`.
    pub model_type: String,
    /// Pretrained model identifier, e.g. `roberta-base`.
    pub model_name: String,
    /// Documents per forward pass.
    pub batch_size: usize,
    /// Maximum tokens per document; longer input is truncated.
    pub max_length: usize,
    /// How hidden states are merged.
    #[serde(default)]
    pub combine_method: CombineMethod,
    /// Number of last hidden states to merge.
    pub num_hidden: usize,
}

impl RepresentationParams {
    /// Reject zero sizes and blank model identifiers.
    pub fn validate(&self) -> StatsResult<()> {
        let sizes = [
            ("batch_size", self.batch_size),
            ("max_length", self.max_length),
            ("num_hidden", self.num_hidden),
        ];
        if let Some((name, _)) = sizes.into_iter().find(|(_, v)| *v == 0) {
            return Err(StatsError::InvalidParameter {
                name,
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.model_name.trim().is_empty() {
            return Err(StatsError::InvalidParameter {
                name: "model_name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Extracted feature arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    /// One vector per document.
    pub sentence_features: Vec<Vec<f32>>,
    /// One vector per token, per document.
    pub token_features: Vec<Vec<Vec<f32>>>,
}

/// Something that turns texts into embedding arrays.
pub trait RepresentationExtractor {
    /// Failure inside the model runtime.
    type Error: From<StatsError>;

    /// Extract representations for `texts`, in order.
    fn extract(
        &self,
        texts: &[String],
        params: &RepresentationParams,
    ) -> Result<Representation, Self::Error>;
}
