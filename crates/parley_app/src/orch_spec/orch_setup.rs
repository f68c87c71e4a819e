use std::collections::HashMap;
use std::time::Duration;

use derive_setters::Setters;
use parley_domain::{
    ChatCompletionMessage, ChatHistory, Context, ToolCallFull, ToolDefinition, Turn,
};

use crate::TurnReply;
use crate::orch_spec::orch_runner::Runner;

/// Canned behaviour of one tool in the scripted registry.
#[derive(Clone, Debug)]
pub struct MockTool {
    pub output: Result<String, String>,
    pub delay: Duration,
}

impl MockTool {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { output: Ok(output.into()), delay: Duration::ZERO }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self { output: Err(message.into()), delay: Duration::ZERO }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Setters)]
#[setters(into)]
pub struct TestContext {
    pub user_messages: Vec<String>,
    /// Replies of the model endpoint, consumed in order. `Err` simulates a
    /// transport failure.
    pub mock_assistant_responses: Vec<Result<ChatCompletionMessage, String>>,
    pub mock_tools: HashMap<String, MockTool>,
    pub reasoning_marker: String,

    // Final output of the test is stored in the context
    pub output: TestOutput,
}

impl TestContext {
    pub fn init_turn(user_text: &str) -> Self {
        Self {
            user_messages: vec![user_text.to_string()],
            mock_assistant_responses: Default::default(),
            mock_tools: HashMap::from([
                ("arxiv".to_string(), MockTool::ok("No good Arxiv Result was found")),
                (
                    "wikipedia".to_string(),
                    MockTool::ok("No good Wikipedia Search Result was found"),
                ),
                ("tavily_search_results_json".to_string(), MockTool::ok("[]")),
            ]),
            reasoning_marker: "</think>".to_string(),
            output: TestOutput::default(),
        }
    }

    pub fn mock_tool(mut self, name: &str, tool: MockTool) -> Self {
        self.mock_tools.insert(name.to_string(), tool);
        self
    }

    /// Runs every user message through the turn boundary.
    pub async fn run(&mut self) {
        Runner::run(self).await
    }

    /// Runs the first user message through the orchestrator alone.
    pub async fn run_orchestrator(&mut self) -> anyhow::Result<Turn> {
        Runner::run_orchestrator(self).await
    }
}

#[derive(Debug, Default)]
pub struct TestOutput {
    pub replies: Vec<TurnReply>,
    pub history: ChatHistory,
    /// Every conversation the model endpoint received, in order.
    pub chat_requests: Vec<Context>,
    /// Every call the registry received, in arrival order.
    pub tool_calls: Vec<ToolCallFull>,
    pub definitions: Vec<ToolDefinition>,
}

impl TestOutput {
    /// Text of the single user message of each request sent without tools.
    pub fn synthesis_prompts(&self) -> Vec<&str> {
        self.chat_requests
            .iter()
            .filter(|context| context.tools.is_empty())
            .filter_map(|context| context.first_user_message())
            .collect()
    }
}
