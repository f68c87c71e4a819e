use parley_domain::{ChatCompletionMessage, Context, ContextMessage, ToolCallFull, ToolDefinition, ToolResult};

/// Hosted model that answers a conversation, optionally with tool calls.
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    /// Sends the whole conversation. Tools are offered when `context.tools` is
    /// non-empty.
    async fn chat(&self, context: &Context) -> anyhow::Result<ChatCompletionMessage>;

    /// Sends a single user message without tools and returns only its text.
    async fn prompt(&self, text: &str) -> anyhow::Result<String> {
        let context = Context::default().add_message(ContextMessage::user(text));
        let message = self.chat(&context).await?;
        Ok(message.content)
    }
}

/// Named lookups the model may ask for.
#[async_trait::async_trait]
pub trait ToolService: Send + Sync {
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Runs one call. Failures are reported inside the returned result.
    async fn call(&self, call: ToolCallFull) -> ToolResult;
}

pub trait Services: Send + Sync + 'static {
    type ChatService: ChatService;
    type ToolService: ToolService;

    fn chat_service(&self) -> &Self::ChatService;
    fn tool_service(&self) -> &Self::ToolService;
}

#[async_trait::async_trait]
impl<I: Services> ChatService for I {
    async fn chat(&self, context: &Context) -> anyhow::Result<ChatCompletionMessage> {
        self.chat_service().chat(context).await
    }

    async fn prompt(&self, text: &str) -> anyhow::Result<String> {
        self.chat_service().prompt(text).await
    }
}

#[async_trait::async_trait]
impl<I: Services> ToolService for I {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tool_service().definitions()
    }

    async fn call(&self, call: ToolCallFull) -> ToolResult {
        self.tool_service().call(call).await
    }
}
