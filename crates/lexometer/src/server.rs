//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the statistics engine over the MCP protocol, making it
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library
//! that the CLI commands use, and each `#[tool]` method delegates to
//! `lexometer_core` rather than computing anything itself.
//!
//! # Adding Tools
//!
//! 1. Define a parameter struct with `Deserialize` + `JsonSchema`
//! 2. Add a `#[tool(description = "...")]` method to the `#[tool_router]` impl
//! 3. Call core library functions, convert errors to `McpError`
//! 4. Return `CallToolResult::success(vec![Content::text(...)])`

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use lexometer_core::statistics::{StatisticsConfig, compute_statistics};
use lexometer_core::{Batch, preprocess, word_syllables};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `compute_statistics` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ComputeStatisticsParams {
    /// Documents to analyze, in order. Row `i` of the result is document `i`.
    pub texts: Vec<String>,
    /// Syllable thresholds for `num_polysyllables_T` columns. Omit for the server default.
    pub polysyllable_thresholds: Option<Vec<u32>>,
    /// Character-length thresholds for `num_long_T` columns. Omit for the server default.
    pub long_word_thresholds: Option<Vec<u32>>,
    /// Also compute num_char, ARI, Coleman-Liau, Gunning fog, SMOG, and Linsear Write.
    pub extended: Option<bool>,
}

/// Parameters for the `count_syllables` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountSyllablesParams {
    /// Words to count. Each is preprocessed and may expand to several words.
    pub words: Vec<String>,
}

/// Parameters for the `preprocess_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PreprocessTextParams {
    /// The text to normalize.
    pub text: String,
}

#[derive(Serialize)]
struct SyllableCount {
    word: String,
    syllables: usize,
}

/// MCP server exposing the statistics engine to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    statistics: StatisticsConfig,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with default statistics settings.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            statistics: StatisticsConfig::default(),
            max_input_bytes: None,
        }
    }

    /// Use `statistics` for requests that do not override it.
    #[must_use]
    pub fn with_statistics_config(mut self, statistics: StatisticsConfig) -> Self {
        self.statistics = statistics;
        self
    }

    /// Reject requests whose combined text exceeds `max_input_bytes`.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, max_input_bytes: Option<usize>) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    fn check_input_size(&self, len: usize) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if len > max => Err(McpError::invalid_params(
                format!("input too large: {len} bytes (limit: {max} bytes)"),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "columns": self.statistics.column_names(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute the feature table for a batch of documents.
    #[tool(
        description = "Compute readability statistics for each text: word, letter, and syllable counts, polysyllable and long-word counts, and Flesch scores. Undefined scores are null."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", documents = params.texts.len()))]
    fn compute_statistics(
        &self,
        Parameters(params): Parameters<ComputeStatisticsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "compute_statistics",
            documents = params.texts.len(),
            "executing MCP tool"
        );

        self.check_input_size(params.texts.iter().map(String::len).sum())?;

        let config = StatisticsConfig::new(
            params
                .polysyllable_thresholds
                .unwrap_or_else(|| self.statistics.polysyllable_thresholds().to_vec()),
            params
                .long_word_thresholds
                .unwrap_or_else(|| self.statistics.long_word_thresholds().to_vec()),
        )
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?
        .with_extended_scores(params.extended.unwrap_or(self.statistics.extended_scores()))
        .with_execution(self.statistics.execution());

        let table = compute_statistics(&Batch::new(params.texts), &config);

        let json = serde_json::to_string_pretty(&table)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "compute_statistics",
            rows = table.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Count syllables per word with the vowel-cluster heuristic.
    #[tool(description = "Count heuristic syllables for each word after preprocessing.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_syllables(
        &self,
        Parameters(params): Parameters<CountSyllablesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "count_syllables",
            inputs = params.words.len(),
            "executing MCP tool"
        );

        self.check_input_size(params.words.iter().map(String::len).sum())?;

        let counts: Vec<SyllableCount> = params
            .words
            .iter()
            .map(String::as_str)
            .flat_map(word_syllables)
            .map(|(word, syllables)| SyllableCount { word, syllables })
            .collect();

        let json = serde_json::to_string_pretty(&counts)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "count_syllables",
            words = counts.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Normalize text the way word-level statistics see it.
    #[tool(
        description = "Preprocess text: lowercase, drop digits, split hyphens, strip punctuation, collapse whitespace."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn preprocess_text(
        &self,
        Parameters(params): Parameters<PreprocessTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "preprocess_text",
            text_len = params.text.len(),
            "executing MCP tool"
        );

        self.check_input_size(params.text.len())?;

        let text = preprocess(&params.text);

        tracing::info!(tool = "preprocess_text", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use compute_statistics for per-document readability features.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn stats_params(texts: &[&str]) -> ComputeStatisticsParams {
        ComputeStatisticsParams {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            polysyllable_thresholds: None,
            long_word_thresholds: None,
            extended: None,
        }
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");

        assert!(!result.is_error.unwrap_or(false));
        assert!(!result.content.is_empty());

        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["columns"].as_array().unwrap().len(), 17);
    }

    #[test]
    fn compute_statistics_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(stats_params(&[
            "This is test-sentence number 1 with a comma ,.",
            "homomorphism",
        ]));

        let result = server
            .compute_statistics(params)
            .expect("compute_statistics should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["num_words"], 8);
        assert_eq!(rows[0]["num_syllables"], 12);
        assert!(rows[1]["flesch_reading_ease"].is_null());
    }

    #[test]
    fn compute_statistics_tool_honors_overrides() {
        let server = ProjectServer::new();
        let mut params = stats_params(&["One short sentence."]);
        params.polysyllable_thresholds = Some(vec![4]);
        params.long_word_thresholds = Some(vec![6]);
        params.extended = Some(true);

        let result = server
            .compute_statistics(Parameters(params))
            .expect("compute_statistics should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        let row = &json["rows"][0];
        assert!(row.get("num_polysyllables_4").is_some());
        assert!(row.get("num_polysyllables_2").is_none());
        assert!(row.get("num_long_6").is_some());
        assert!(row.get("smog_index").is_some());
        assert!(row.get("linsear_write").is_some());
    }

    #[test]
    fn compute_statistics_tool_rejects_zero_threshold() {
        let server = ProjectServer::new();
        let mut params = stats_params(&["Text."]);
        params.long_word_thresholds = Some(vec![0]);

        assert!(server.compute_statistics(Parameters(params)).is_err());
    }

    #[test]
    fn compute_statistics_tool_enforces_input_limit() {
        let server = ProjectServer::new().with_max_input_bytes(Some(8));
        let params = Parameters(stats_params(&["This text is longer than eight bytes."]));

        assert!(server.compute_statistics(params).is_err());
    }

    #[test]
    fn count_syllables_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(CountSyllablesParams {
            words: vec!["homomorphism".to_string(), "test-sentence".to_string()],
        });

        let result = server
            .count_syllables(params)
            .expect("count_syllables should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        let counts = json.as_array().unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0]["syllables"], 4);
        assert_eq!(counts[2]["word"], "sentence");
        assert_eq!(counts[2]["syllables"], 3);
    }

    #[test]
    fn preprocess_text_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(PreprocessTextParams {
            text: "This is test-sentence number 1 with a comma ,.".to_string(),
        });

        let result = server
            .preprocess_text(params)
            .expect("preprocess_text should succeed");
        let text = extract_text(&result).expect("should have text content");
        assert_eq!(text, "this is test sentence number with a comma ");
    }

    #[test]
    fn server_uses_configured_defaults() {
        let config = StatisticsConfig::new([2], [3]).unwrap();
        let server = ProjectServer::new().with_statistics_config(config);
        let result = server
            .compute_statistics(Parameters(stats_params(&["Hi there."])))
            .expect("compute_statistics should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        assert_eq!(json["columns"].as_array().unwrap().len(), 11);
    }
}
