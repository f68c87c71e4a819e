use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use parley_domain::{
    ChatCompletionMessage, Context, Error, ToolCallFull, ToolDefinition, ToolResult, Turn,
};

use super::orch_setup::{MockTool, TestContext};
use crate::{ChatService, Orchestrator, ParleyApp, Services, TemplateEngine, ToolService};

pub struct Runner;

impl Runner {
    pub async fn run(setup: &mut TestContext) {
        let services = Arc::new(MockServices::new(setup));
        let mut app = ParleyApp::new(services.clone(), setup.reasoning_marker.clone()).unwrap();

        for message in setup.user_messages.clone() {
            let reply = app.run_turn(&message).await;
            setup.output.replies.push(reply);
        }

        setup.output.history = app.history().clone();
        services.collect(setup);
    }

    pub async fn run_orchestrator(setup: &mut TestContext) -> anyhow::Result<Turn> {
        let services = Arc::new(MockServices::new(setup));
        let orch = Orchestrator::new(services.clone(), Arc::new(TemplateEngine::new().unwrap()));

        let result = orch.run(&setup.user_messages[0]).await;
        services.collect(setup);
        result
    }
}

struct MockChat {
    responses: Mutex<VecDeque<Result<ChatCompletionMessage, String>>>,
    requests: Mutex<Vec<Context>>,
}

#[async_trait::async_trait]
impl ChatService for MockChat {
    async fn chat(&self, context: &Context) -> anyhow::Result<ChatCompletionMessage> {
        self.requests.lock().unwrap().push(context.clone());
        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(Ok(message)) => Ok(message),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Err(anyhow::anyhow!("No mock response left")),
        }
    }
}

struct MockTools {
    tools: HashMap<String, MockTool>,
    calls: Mutex<Vec<ToolCallFull>>,
}

#[async_trait::async_trait]
impl ToolService for MockTools {
    fn definitions(&self) -> Vec<ToolDefinition> {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        names.into_iter().map(ToolDefinition::new).collect()
    }

    async fn call(&self, call: ToolCallFull) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        let result = ToolResult::from(&call);

        let Some(tool) = self.tools.get(call.name.as_str()) else {
            return result.failure(Error::ToolNotFound(call.name.clone()).into());
        };

        tokio::time::sleep(tool.delay).await;
        match &tool.output {
            Ok(output) => result.success(output.clone()),
            Err(error) => result.failure(anyhow::anyhow!(error.clone())),
        }
    }
}

struct MockServices {
    chat: MockChat,
    tools: MockTools,
}

impl MockServices {
    fn new(setup: &TestContext) -> Self {
        Self {
            chat: MockChat {
                responses: Mutex::new(setup.mock_assistant_responses.clone().into()),
                requests: Mutex::new(Vec::new()),
            },
            tools: MockTools { tools: setup.mock_tools.clone(), calls: Mutex::new(Vec::new()) },
        }
    }

    fn collect(&self, setup: &mut TestContext) {
        setup.output.chat_requests = self.chat.requests.lock().unwrap().clone();
        setup.output.tool_calls = self.tools.calls.lock().unwrap().clone();
        setup.output.definitions = self.tools.definitions();
    }
}

impl Services for MockServices {
    type ChatService = MockChat;
    type ToolService = MockTools;

    fn chat_service(&self) -> &Self::ChatService {
        &self.chat
    }

    fn tool_service(&self) -> &Self::ToolService {
        &self.tools
    }
}
