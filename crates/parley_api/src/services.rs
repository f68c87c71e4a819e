use parley_app::Services;
use parley_config::Environment;
use parley_provider::OpenAIProvider;
use parley_services::ToolRegistry;
use reqwest::Client;

/// Production collaborators of the orchestrator.
pub struct ParleyServices {
    chat: OpenAIProvider,
    tools: ToolRegistry,
}

impl ParleyServices {
    pub fn new(env: &Environment, client: Client) -> Self {
        Self {
            chat: OpenAIProvider::new(env, client.clone()),
            tools: ToolRegistry::new(env, client),
        }
    }
}

impl Services for ParleyServices {
    type ChatService = OpenAIProvider;
    type ToolService = ToolRegistry;

    fn chat_service(&self) -> &Self::ChatService {
        &self.chat
    }

    fn tool_service(&self) -> &Self::ToolService {
        &self.tools
    }
}
