use anyhow::{Context as _, anyhow, bail};
use parley_config::Environment;
use parley_domain::ToolName;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::truncate::{MAX_QUERY_CHARS, truncate_chars};
use crate::{ExecutableTool, NamedTool, QueryInput, ToolDescription};

const NO_RESULT: &str = "No good Wikipedia Search Result was found";

/// Looks up encyclopedia pages: a full-text search for candidate titles,
/// then the summary of each page.
#[derive(Debug, Clone)]
pub struct Wikipedia {
    client: Client,
    api_url: Url,
    rest_url: Url,
    top_k_results: usize,
    doc_content_chars_max: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    #[serde(default)]
    extract: String,
}

impl Wikipedia {
    pub fn new(env: &Environment, client: Client) -> Self {
        Self {
            client,
            api_url: env.wikipedia_api_url.clone(),
            rest_url: env.wikipedia_rest_url.clone(),
            top_k_results: env.tools.top_k_results,
            doc_content_chars_max: env.tools.doc_content_chars_max,
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<String>> {
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("formatversion", "2"),
                ("srprop", ""),
                ("srsearch", truncate_chars(query, MAX_QUERY_CHARS)),
                ("srlimit", &self.top_k_results.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to query {}", self.api_url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Wikipedia search responded with status {status}");
        }

        let body: SearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse search response from {}", self.api_url))?;

        Ok(body
            .query
            .map(|query| query.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }

    fn summary_url(&self, title: &str) -> anyhow::Result<Url> {
        let page = title.replace(' ', "_");
        let mut url = self.rest_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be used as a base URL", self.rest_url))?
            .pop_if_empty()
            .extend(["page", "summary", page.as_str()]);
        Ok(url)
    }

    async fn summary(&self, title: &str) -> anyhow::Result<PageSummary> {
        let url = self.summary_url(title)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to query {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Wikipedia page {title} responded with status {status}");
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse page summary from {url}"))
    }
}

impl NamedTool for Wikipedia {
    fn tool_name() -> ToolName {
        ToolName::new("wikipedia")
    }
}

impl ToolDescription for Wikipedia {
    fn description(&self) -> String {
        "A wrapper around Wikipedia. Useful for when you need to answer general questions about people, places, companies, facts, historical events, or other subjects. Input should be a search query.".to_string()
    }
}

#[async_trait::async_trait]
impl ExecutableTool for Wikipedia {
    type Input = QueryInput;

    async fn call(&self, input: Self::Input) -> anyhow::Result<String> {
        let titles = self.search(&input.query).await?;
        debug!(query = %input.query, hits = titles.len(), "Wikipedia search completed");

        let mut docs = Vec::new();
        for title in titles.iter().take(self.top_k_results) {
            // Pages that cannot be summarized are skipped, not fatal
            match self.summary(title).await {
                Ok(page) => docs.push(format!("Page: {}\nSummary: {}", page.title, page.extract)),
                Err(error) => warn!(title = %title, error = ?error, "Skipping Wikipedia page"),
            }
        }

        if docs.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        let docs = docs.join("\n\n");
        Ok(truncate_chars(&docs, self.doc_content_chars_max).to_string())
    }
}
