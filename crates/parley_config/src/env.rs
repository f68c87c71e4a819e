use std::collections::HashMap;
use std::path::{Path, PathBuf};

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{ApiKey, Error, HttpConfig, Result, Temperature, ToolConfig};

/// Name of the variable holding the model provider credential.
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
/// Name of the variable holding the web search credential.
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";

/// Process-wide configuration, resolved once at startup and handed to every
/// collaborator that needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "snake_case")]
#[setters(into)]
pub struct Environment {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Sampling temperature; the provider default applies when absent.
    #[setters(strip_option)]
    pub temperature: Option<Temperature>,
    #[setters(strip_option)]
    pub max_tokens: Option<u32>,
    /// Base URL of the OpenAI-compatible chat completions API.
    pub provider_url: Url,
    #[serde(default)]
    pub groq_api_key: ApiKey,
    #[serde(default)]
    pub tavily_api_key: ApiKey,
    pub arxiv_url: Url,
    pub wikipedia_api_url: Url,
    pub wikipedia_rest_url: Url,
    pub tavily_url: Url,
    /// Closing delimiter of the model's reasoning block.
    pub reasoning_marker: String,
    pub http: HttpConfig,
    pub tools: ToolConfig,
}

impl Environment {
    /// Loads `.env` files from the working directory and its ancestors, then
    /// resolves the configuration from the process environment.
    ///
    /// # Errors
    /// Fails when a credential is missing or a setting cannot be parsed.
    pub fn from_env() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            load_dotenv(&cwd);
        }
        Self::from_vars(std::env::vars().collect())
    }

    /// Resolves the configuration from an explicit variable map.
    ///
    /// Values come from the embedded `env.json` defaults, overridden by
    /// `PARLEY_*` variables (`__` separates nested keys, e.g.
    /// `PARLEY_TOOLS__TOP_K_RESULTS`). `GROQ_API_KEY` and `TAVILY_API_KEY` take
    /// precedence over their prefixed forms.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        const DEFAULT_CONFIG: &str = include_str!("../env.json");

        let groq_api_key = vars.get(GROQ_API_KEY).cloned();
        let tavily_api_key = vars.get(TAVILY_API_KEY).cloned();

        let config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Json,
            ))
            .add_source(
                config::Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.into_iter().collect())),
            )
            .set_override_option("groq_api_key", groq_api_key)?
            .set_override_option("tavily_api_key", tavily_api_key)?
            .build()?;

        let env: Environment = config.try_deserialize()?;
        env.validate()?;
        Ok(env)
    }

    /// Checks the invariants serde cannot express. Missing credentials are a
    /// startup failure rather than a per-turn one.
    pub fn validate(&self) -> Result<()> {
        if self.groq_api_key.is_blank() {
            return Err(Error::MissingCredential(GROQ_API_KEY));
        }
        if self.tavily_api_key.is_blank() {
            return Err(Error::MissingCredential(TAVILY_API_KEY));
        }
        if self.model.trim().is_empty() {
            return Err(Error::InvalidSetting { name: "model", reason: "must not be empty".into() });
        }
        if self.reasoning_marker.is_empty() {
            return Err(Error::InvalidSetting {
                name: "reasoning_marker",
                reason: "must not be empty".into(),
            });
        }
        if self.tools.top_k_results == 0 {
            return Err(Error::InvalidSetting {
                name: "tools.top_k_results",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Load all `.env` files with priority to the ones closest to `cwd`.
fn load_dotenv(cwd: &Path) {
    let mut paths = vec![];
    let mut current = PathBuf::new();

    for component in cwd.components() {
        current.push(component);
        paths.push(current.clone());
    }

    // dotenvy never overwrites a variable that is already set, so the closest
    // file has to be loaded first.
    paths.reverse();

    for path in paths {
        let env_file = path.join(".env");
        if env_file.is_file() {
            debug!(path = %env_file.display(), "Loading .env file");
            dotenvy::from_path(&env_file).ok();
        }
    }
}
