use anyhow::{Context as _, bail};
use parley_config::{ApiKey, Environment};
use parley_domain::ToolName;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{ExecutableTool, NamedTool, QueryInput, ToolDescription};

/// Web search through the Tavily API. Results are returned to the model as a
/// JSON array.
#[derive(Debug, Clone)]
pub struct Tavily {
    client: Client,
    url: Url,
    api_key: ApiKey,
    max_results: usize,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SearchResult {
    url: String,
    #[serde(default)]
    content: String,
}

impl Tavily {
    pub fn new(env: &Environment, client: Client) -> Self {
        Self {
            client,
            url: env.tavily_url.clone(),
            api_key: env.tavily_api_key.clone(),
            max_results: env.tools.web_max_results,
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&SearchRequest { query, max_results: self.max_results })
            .send()
            .await
            .with_context(|| format!("Failed to query {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Tavily responded with status {status}: {body}");
        }

        let body: SearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", self.url))?;
        Ok(body.results)
    }
}

impl NamedTool for Tavily {
    fn tool_name() -> ToolName {
        ToolName::new("tavily_search_results_json")
    }
}

impl ToolDescription for Tavily {
    fn description(&self) -> String {
        "A search engine optimized for comprehensive, accurate, and trusted results. Useful for when you need to answer questions about current events. Input should be a search query.".to_string()
    }
}

#[async_trait::async_trait]
impl ExecutableTool for Tavily {
    type Input = QueryInput;

    async fn call(&self, input: Self::Input) -> anyhow::Result<String> {
        let results = self.search(&input.query).await?;
        debug!(query = %input.query, results = results.len(), "Tavily search completed");

        serde_json::to_string(&results).context("Failed to serialize search results")
    }
}
