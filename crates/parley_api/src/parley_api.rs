use std::sync::Arc;

use anyhow::Context as _;
use parley_app::{ParleyApp, ToolService, TurnReply};
use parley_config::Environment;
use parley_domain::{ChatHistory, ToolDefinition};
use reqwest::Client;
use tracing::debug;

use crate::{API, ParleyServices};

pub struct ParleyAPI {
    services: Arc<ParleyServices>,
    app: ParleyApp<ParleyServices>,
    env: Environment,
}

impl ParleyAPI {
    /// Wires the model endpoint and the tool registry over one shared HTTP
    /// client configured from `env.http`.
    pub fn init(env: Environment) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(env.http.connect_timeout())
            .read_timeout(env.http.read_timeout())
            .user_agent(env.http.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        debug!(model = %env.model, provider = %env.provider_url, "Initializing services");

        let services = Arc::new(ParleyServices::new(&env, client));
        let app = ParleyApp::new(services.clone(), env.reasoning_marker.clone())?;
        Ok(Self { services, app, env })
    }
}

#[async_trait::async_trait]
impl API for ParleyAPI {
    async fn chat(&mut self, text: &str) -> TurnReply {
        self.app.run_turn(text).await
    }

    fn history(&self) -> &ChatHistory {
        self.app.history()
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        self.services.definitions()
    }

    fn environment(&self) -> &Environment {
        &self.env
    }
}
