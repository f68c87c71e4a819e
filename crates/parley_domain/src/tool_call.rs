use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result, ToolName};

/// Unique identifier the model assigns to a single tool call
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolCallId(String);

impl ToolCallId {
    pub fn new(value: impl ToString) -> Self {
        ToolCallId(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A complete request from the model to invoke one registered tool.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
#[serde(rename_all = "snake_case")]
pub struct ToolCallFull {
    pub name: ToolName,
    pub call_id: Option<ToolCallId>,
    pub arguments: Value,
}

impl ToolCallFull {
    pub fn new(tool_name: impl Into<ToolName>) -> Self {
        Self { name: tool_name.into(), call_id: None, arguments: Value::default() }
    }

    /// Parses the JSON-encoded argument string the model sends on the wire.
    /// An empty string means the call has no arguments.
    pub fn parse_arguments(raw: &str) -> Result<Value> {
        if raw.trim().is_empty() {
            return Ok(Value::default());
        }
        serde_json::from_str(raw).map_err(Error::ToolCallArgument)
    }
}
