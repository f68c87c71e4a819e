use parley_app::ToolService;
use parley_config::Environment;
use parley_domain::{Error, ToolCallFull, ToolDefinition, ToolName, ToolResult};
use reqwest::Client;
use tracing::{debug, warn};

use crate::{Arxiv, ExecutableTool, Tavily, Tool, Wikipedia};

/// Tools offered to the model, dispatched by name. Registration order is the
/// order in which definitions are advertised.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Registry with the arXiv, Wikipedia and web search tools.
    pub fn new(env: &Environment, client: Client) -> Self {
        Self::default()
            .register(Arxiv::new(env, client.clone()))
            .register(Wikipedia::new(env, client.clone()))
            .register(Tavily::new(env, client))
    }

    pub fn register<T: ExecutableTool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Tool::new(tool));
        self
    }

    fn find(&self, name: &ToolName) -> Option<&Tool> {
        self.tools.iter().find(|tool| &tool.definition.name == name)
    }

    async fn call_inner(&self, call: &ToolCallFull) -> anyhow::Result<String> {
        let tool = self
            .find(&call.name)
            .ok_or_else(|| Error::ToolNotFound(call.name.clone()))?;
        tool.call(call.arguments.clone()).await
    }
}

#[async_trait::async_trait]
impl ToolService for ToolRegistry {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition.clone()).collect()
    }

    async fn call(&self, call: ToolCallFull) -> ToolResult {
        debug!(tool = %call.name, arguments = %call.arguments, "Calling tool");
        let result = ToolResult::from(&call);

        match self.call_inner(&call).await {
            Ok(output) => result.success(output),
            Err(error) => {
                warn!(tool = %call.name, error = ?error, "Tool call failed");
                result.failure(error)
            }
        }
    }
}
