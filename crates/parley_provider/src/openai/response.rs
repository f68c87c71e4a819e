use parley_domain::{
    ChatCompletionMessage, Error, FinishReason, ToolCallFull, ToolCallId, Usage,
};
use serde::Deserialize;

use super::request::ToolCall;

/// Non-streamed `/chat/completions` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<ResponseUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl From<ResponseUsage> for Usage {
    fn from(value: ResponseUsage) -> Self {
        Usage {
            prompt_tokens: value.prompt_tokens,
            completion_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

fn finish_reason(value: &str) -> Option<FinishReason> {
    match value {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" | "function_call" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

impl TryFrom<ToolCall> for ToolCallFull {
    type Error = Error;

    fn try_from(value: ToolCall) -> Result<Self, Self::Error> {
        Ok(ToolCallFull {
            name: value.function.name.into(),
            call_id: value.id.map(ToolCallId::new),
            arguments: ToolCallFull::parse_arguments(&value.function.arguments)?,
        })
    }
}

impl TryFrom<Response> for ChatCompletionMessage {
    type Error = Error;

    /// Only the first choice is used.
    fn try_from(value: Response) -> Result<Self, Self::Error> {
        let choice = value.choices.into_iter().next().ok_or(Error::EmptyResponse)?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(ToolCallFull::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChatCompletionMessage {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason.as_deref().and_then(finish_reason),
            usage: value.usage.map(Usage::from),
        })
    }
}
