use parley_domain::{Error, ToolDefinition, ToolName};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub trait NamedTool {
    fn tool_name() -> ToolName;
}

pub trait ToolDescription {
    fn description(&self) -> String;
}

/// A lookup the model can request by name.
#[async_trait::async_trait]
pub trait ExecutableTool: NamedTool + ToolDescription + Send + Sync {
    type Input: DeserializeOwned + JsonSchema + Send;

    async fn call(&self, input: Self::Input) -> anyhow::Result<String>;
}

/// Input shared by every search tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// Search query
    pub query: String,
}

#[async_trait::async_trait]
trait JsonTool: Send + Sync {
    async fn call_json(&self, arguments: Value) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
impl<T: ExecutableTool> JsonTool for T {
    async fn call_json(&self, arguments: Value) -> anyhow::Result<String> {
        let input: T::Input = serde_json::from_value(arguments).map_err(Error::ToolCallArgument)?;
        self.call(input).await
    }
}

/// A registered tool: its advertised definition plus the type-erased
/// implementation.
pub struct Tool {
    pub definition: ToolDefinition,
    executable: Box<dyn JsonTool>,
}

impl Tool {
    pub fn new<T: ExecutableTool + 'static>(tool: T) -> Self {
        let definition = ToolDefinition::new(T::tool_name())
            .description(tool.description())
            .with_input::<T::Input>();
        Self { definition, executable: Box::new(tool) }
    }

    /// Decodes `arguments` into the tool's input and runs it.
    pub async fn call(&self, arguments: Value) -> anyhow::Result<String> {
        self.executable.call_json(arguments).await
    }
}
