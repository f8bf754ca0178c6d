//! Ordered document batches and the formats they are read from.
//!
//! Validation happens here, before any statistic is computed. A batch that
//! can be built is one every document of which yields a full row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StatsError, StatsResult};
use crate::text;

/// How file content is split into documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BatchFormat {
    /// One document per non-blank line.
    #[default]
    Lines,
    /// One document per blank-line separated paragraph.
    Paragraphs,
    /// The whole content is a single document.
    Whole,
    /// A JSON array of strings.
    Json,
}

impl BatchFormat {
    /// Returns the format name as used in config files and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Paragraphs => "paragraphs",
            Self::Whole => "whole",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for BatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of documents. Row `i` of any result is document `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    documents: Vec<String>,
}

impl Batch {
    /// Wrap documents as-is.
    pub const fn new(documents: Vec<String>) -> Self {
        Self { documents }
    }

    /// One document per non-blank line.
    pub fn from_lines(content: &str) -> Self {
        Self::new(text::split_lines(content))
    }

    /// One document per paragraph.
    pub fn from_paragraphs(content: &str) -> Self {
        Self::new(text::split_paragraphs(content))
    }

    /// The entire content as one document.
    pub fn whole(content: &str) -> Self {
        Self::new(vec![content.to_string()])
    }

    /// Parse a JSON array of strings.
    ///
    /// Any non-string entry rejects the whole batch, naming its index.
    pub fn from_json_str(content: &str) -> StatsResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Array(entries) = value else {
            return Err(StatsError::InvalidInput {
                index: 0,
                reason: format!("expected a JSON array, found {}", kind(&value)),
            });
        };

        let documents = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::String(s) => Ok(s),
                other => Err(StatsError::InvalidInput {
                    index,
                    reason: format!("expected a string, found {}", kind(&other)),
                }),
            })
            .collect::<StatsResult<Vec<_>>>()?;

        Ok(Self::new(documents))
    }

    /// Split `content` according to `format`.
    #[tracing::instrument(skip(content), fields(content_len = content.len()))]
    pub fn parse(content: &str, format: BatchFormat) -> StatsResult<Self> {
        let batch = match format {
            BatchFormat::Lines => Self::from_lines(content),
            BatchFormat::Paragraphs => Self::from_paragraphs(content),
            BatchFormat::Whole => Self::whole(content),
            BatchFormat::Json => Self::from_json_str(content)?,
        };
        tracing::debug!(documents = batch.len(), "batch parsed");
        Ok(batch)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The documents in order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Iterate over documents in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.documents.iter()
    }
}

impl From<Vec<String>> for Batch {
    fn from(documents: Vec<String>) -> Self {
        Self::new(documents)
    }
}

impl<'a> FromIterator<&'a str> for Batch {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_of_strings() {
        let batch = Batch::from_json_str(r#"["one.", "two, three.", ""]"#).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.documents()[1], "two, three.");
        assert_eq!(batch.documents()[2], "");
    }

    #[test]
    fn json_non_string_entry_is_invalid_input() {
        let err = Batch::from_json_str(r#"["fine", 42, "also fine"]"#).unwrap_err();
        match err {
            StatsError::InvalidInput { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("number"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_top_level_must_be_array() {
        assert!(matches!(
            Batch::from_json_str(r#"{"text": "hi"}"#),
            Err(StatsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Batch::from_json_str("[not json"),
            Err(StatsError::MalformedBatch(_))
        ));
    }

    #[test]
    fn parse_by_format() {
        let content = "First line.\nSecond line.\n\nThird paragraph.";
        assert_eq!(Batch::parse(content, BatchFormat::Lines).unwrap().len(), 3);
        assert_eq!(
            Batch::parse(content, BatchFormat::Paragraphs).unwrap().len(),
            2
        );
        assert_eq!(Batch::parse(content, BatchFormat::Whole).unwrap().len(), 1);
    }

    #[test]
    fn empty_json_array_is_empty_batch() {
        let batch = Batch::parse("[]", BatchFormat::Json).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn collects_from_str_iter() {
        let batch: Batch = ["a.", "b."].into_iter().collect();
        assert_eq!(batch.documents(), ["a.", "b."]);
    }

    #[test]
    fn format_names() {
        assert_eq!(BatchFormat::Paragraphs.as_str(), "paragraphs");
        assert_eq!(BatchFormat::default(), BatchFormat::Lines);
    }
}
