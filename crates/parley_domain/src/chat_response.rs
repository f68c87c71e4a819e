use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::ToolCallFull;

/// Why the model stopped generating.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// A complete, non-streamed reply from the model endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Setters)]
#[setters(into, strip_option)]
pub struct ChatCompletionMessage {
    pub content: String,
    pub tool_calls: Vec<ToolCallFull>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<Usage>,
}

impl ChatCompletionMessage {
    pub fn assistant(content: impl ToString) -> Self {
        Self { content: content.to_string(), ..Default::default() }
    }

    pub fn has_tool_call(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
