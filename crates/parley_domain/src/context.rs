use derive_more::derive::From;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use crate::{ToolCallFull, ToolDefinition, ToolResult};

/// One entry of the conversation state. The set of message kinds is closed:
/// every consumer matches on all three.
#[derive(Clone, Debug, Deserialize, From, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ContextMessage {
    User(TextMessage),
    Assistant(AssistantMessage),
    Tool(ToolResult),
}

impl ContextMessage {
    pub fn user(content: impl ToString) -> Self {
        TextMessage { content: content.to_string() }.into()
    }

    pub fn assistant(content: impl ToString, tool_calls: Vec<ToolCallFull>) -> Self {
        AssistantMessage { content: content.to_string(), tool_calls }.into()
    }

    pub fn tool_result(result: ToolResult) -> Self {
        Self::Tool(result)
    }

    pub fn role(&self) -> Role {
        match self {
            ContextMessage::User(_) => Role::User,
            ContextMessage::Assistant(_) => Role::Assistant,
            ContextMessage::Tool(_) => Role::Tool,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == role
    }

    pub fn content(&self) -> &str {
        match self {
            ContextMessage::User(message) => &message.content,
            ContextMessage::Assistant(message) => &message.content,
            ContextMessage::Tool(result) => &result.content,
        }
    }

    pub fn has_tool_call(&self) -> bool {
        match self {
            ContextMessage::User(_) => false,
            ContextMessage::Assistant(message) => message.has_tool_call(),
            ContextMessage::Tool(_) => false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TextMessage {
    pub content: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AssistantMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallFull>,
}

impl AssistantMessage {
    pub fn has_tool_call(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// Ordered conversation state for a single turn, together with the tools the
/// model may call. Messages are only ever appended.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Setters, PartialEq)]
#[setters(into)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ContextMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl Context {
    pub fn add_message(mut self, content: impl Into<ContextMessage>) -> Self {
        let content = content.into();
        debug!(role = %content.role(), "Adding message to context");
        self.messages.push(content);

        self
    }

    pub fn add_tool_results(mut self, results: Vec<ToolResult>) -> Self {
        if !results.is_empty() {
            debug!(count = results.len(), "Adding tool results to context");
            self.messages
                .extend(results.into_iter().map(ContextMessage::tool_result));
        }

        self
    }

    /// Text of the message that opened the turn.
    pub fn first_user_message(&self) -> Option<&str> {
        self.messages.iter().find_map(|message| match message {
            ContextMessage::User(text) => Some(text.content.as_str()),
            _ => None,
        })
    }

    /// Tool calls carried by the most recent message, if it is an assistant
    /// message.
    pub fn pending_tool_calls(&self) -> &[ToolCallFull] {
        match self.messages.last() {
            Some(ContextMessage::Assistant(message)) => &message.tool_calls,
            _ => &[],
        }
    }

    pub fn tool_results(&self) -> impl Iterator<Item = &ToolResult> {
        self.messages.iter().filter_map(|message| match message {
            ContextMessage::Tool(result) => Some(result),
            _ => None,
        })
    }
}
