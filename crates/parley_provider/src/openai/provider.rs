use anyhow::{Context as _, Result};
use parley_app::ChatService;
use parley_config::{ApiKey, Environment, Temperature};
use parley_domain::{ChatCompletionMessage, Context, Error, ModelId};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info};
use url::Url;

use super::request::Request;
use super::response::Response;
use crate::utils::{format_http_context, sanitize_headers};

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    base_url: Url,
    api_key: ApiKey,
    model: ModelId,
    temperature: Option<Temperature>,
    max_tokens: Option<u32>,
}

impl OpenAIProvider {
    pub fn new(env: &Environment, client: Client) -> Self {
        Self {
            client,
            base_url: env.provider_url.clone(),
            api_key: env.groq_api_key.clone(),
            model: ModelId::new(env.model.clone()),
            temperature: env.temperature,
            max_tokens: env.max_tokens,
        }
    }

    fn url(&self, path: &str) -> Result<Url> {
        // Validate the path doesn't contain certain patterns
        if path.contains("://") || path.contains("..") {
            anyhow::bail!("Invalid path: Contains forbidden patterns");
        }

        // Without a trailing slash `join` would replace the last segment
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let path = path.trim_start_matches('/');
        base.join(path)
            .with_context(|| format!("Failed to append {} to base URL: {}", path, self.base_url))
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key.as_str()))
            .context("Model credential is not a valid header value")?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-Title", HeaderValue::from_static("parley"));
        Ok(headers)
    }

    fn request(&self, context: &Context) -> Request {
        let mut request = Request::from(context.clone()).model(self.model.as_str());
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature.value());
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.max_tokens(max_tokens);
        }
        request
    }

    async fn inner_chat(&self, context: &Context) -> Result<ChatCompletionMessage> {
        let request = self.request(context);
        let url = self.url("chat/completions")?;
        let headers = self.headers()?;

        info!(
            url = %url,
            model = %self.model,
            headers = ?sanitize_headers(&headers),
            message_count = request.messages.len(),
            tool_count = request.tools.as_ref().map_or(0, Vec::len),
            "Connecting Upstream"
        );

        let response = self
            .client
            .post(url.clone())
            .headers(headers)
            .json(&request)
            .send()
            .await
            .with_context(|| format_http_context(None, "POST", &url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format_http_context(Some(status), "POST", &url))?;

        if !status.is_success() {
            return Err(Error::InvalidStatusCode { status: status.as_u16(), body })
                .with_context(|| format_http_context(Some(status), "POST", &url));
        }

        let response: Response = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse response from {url}"))?;
        debug!(id = ?response.id, model = ?response.model, choices = response.choices.len(), "Received completion");

        let message = ChatCompletionMessage::try_from(response)
            .with_context(|| format_http_context(Some(status), "POST", &url))?;
        Ok(message)
    }
}

#[async_trait::async_trait]
impl ChatService for OpenAIProvider {
    async fn chat(&self, context: &Context) -> Result<ChatCompletionMessage> {
        self.inner_chat(context).await
    }
}
