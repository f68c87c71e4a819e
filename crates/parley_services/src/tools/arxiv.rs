use std::sync::LazyLock;

use anyhow::{Context as _, bail};
use parley_config::Environment;
use parley_domain::ToolName;
use regex::{Captures, Regex};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::truncate::{MAX_QUERY_CHARS, truncate_chars};
use crate::{ExecutableTool, NamedTool, QueryInput, ToolDescription};

const NO_RESULT: &str = "No good Arxiv Result was found";

/// Searches the arXiv Atom API and returns the top papers.
#[derive(Debug, Clone)]
pub struct Arxiv {
    client: Client,
    url: Url,
    top_k_results: usize,
    doc_content_chars_max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Paper {
    published: String,
    title: String,
    authors: Vec<String>,
    summary: String,
}

impl Paper {
    fn render(&self) -> String {
        format!(
            "Published: {}\nTitle: {}\nAuthors: {}\nSummary: {}",
            self.published,
            self.title,
            self.authors.join(", "),
            self.summary
        )
    }
}

impl Arxiv {
    pub fn new(env: &Environment, client: Client) -> Self {
        Self {
            client,
            url: env.arxiv_url.clone(),
            top_k_results: env.tools.top_k_results,
            doc_content_chars_max: env.tools.doc_content_chars_max,
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<Paper>> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[
                ("search_query", truncate_chars(query, MAX_QUERY_CHARS)),
                ("start", "0"),
                ("max_results", &self.top_k_results.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to query {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("arXiv responded with status {status}");
        }

        let feed = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", self.url))?;
        let mut papers = parse_feed(&feed);
        papers.truncate(self.top_k_results);
        Ok(papers)
    }
}

static ENTRY: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<entry>(.*?)</entry>"));
static TITLE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<title[^>]*>(.*?)</title>"));
static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<summary[^>]*>(.*?)</summary>"));
static PUBLISHED: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"<published>(\d{4}-\d{2}-\d{2})"));
static UPDATED: LazyLock<Regex> = LazyLock::new(|| pattern(r"<updated>(\d{4}-\d{2}-\d{2})"));
static AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<author>\s*<name>(.*?)</name>"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|lt|gt|quot|apos|amp);"));

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("Invalid regex pattern")
}

/// Extracts the entries of an Atom feed. Whitespace inside fields is
/// collapsed since arXiv wraps long titles and abstracts.
fn parse_feed(feed: &str) -> Vec<Paper> {
    let capture = |re: &Regex, text: &str| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean(m.as_str()))
            .unwrap_or_default()
    };

    ENTRY
        .captures_iter(feed)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .map(|body| {
            let date = match capture(&UPDATED, body) {
                date if date.is_empty() => capture(&PUBLISHED, body),
                date => date,
            };
            Paper {
                published: date,
                title: capture(&TITLE, body),
                authors: AUTHOR
                    .captures_iter(body)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| clean(m.as_str()))
                    .collect(),
                summary: capture(&SUMMARY, body),
            }
        })
        .collect()
}

fn clean(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    ENTITY
        .replace_all(&collapsed, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => numeric_reference(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Decodes `#NN` and `#xHH` character references.
fn numeric_reference(name: &str) -> Option<char> {
    let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => name.strip_prefix('#')?.parse().ok()?,
    };
    char::from_u32(code)
}

impl NamedTool for Arxiv {
    fn tool_name() -> ToolName {
        ToolName::new("arxiv")
    }
}

impl ToolDescription for Arxiv {
    fn description(&self) -> String {
        "Query arxiv papers".to_string()
    }
}

#[async_trait::async_trait]
impl ExecutableTool for Arxiv {
    type Input = QueryInput;

    async fn call(&self, input: Self::Input) -> anyhow::Result<String> {
        let papers = self.search(&input.query).await?;
        debug!(query = %input.query, papers = papers.len(), "arXiv search completed");

        if papers.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        let docs = papers.iter().map(Paper::render).collect::<Vec<_>>().join("\n\n");
        Ok(truncate_chars(&docs, self.doc_content_chars_max).to_string())
    }
}
