use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Result bounds applied by the lookup tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "snake_case")]
#[setters(into)]
pub struct ToolConfig {
    /// Number of arXiv papers and Wikipedia pages fetched per query.
    pub top_k_results: usize,
    /// Character budget for the combined arXiv / Wikipedia output.
    pub doc_content_chars_max: usize,
    /// Number of web search hits returned by Tavily.
    pub web_max_results: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { top_k_results: 2, doc_content_chars_max: 500, web_max_results: 5 }
    }
}
