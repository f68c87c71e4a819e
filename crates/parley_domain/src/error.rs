use crate::ToolName;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid tool call arguments: {0}")]
    ToolCallArgument(serde_json::Error),

    #[error("Tool {0} not found")]
    ToolNotFound(ToolName),

    #[error("No final answer was produced for the turn")]
    MissingFinalAnswer,

    #[error("Cannot {action} while the turn is {state}")]
    InvalidTransition { action: &'static str, state: String },

    #[error("Expected {expected} tool result(s), received {actual}")]
    ToolResultMismatch { expected: usize, actual: usize },

    #[error("Model endpoint returned an empty response")]
    EmptyResponse,

    #[error("Model endpoint responded with status {status}: {body}")]
    InvalidStatusCode { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
