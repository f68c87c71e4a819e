use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{ToolCallFull, ToolCallId, ToolName};

/// Outcome of one tool call. Failures are carried as content so that the
/// synthesis stage always has something to reason over.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct ToolResult {
    pub name: ToolName,
    pub call_id: Option<ToolCallId>,
    #[setters(skip)]
    pub content: String,
    #[setters(skip)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn new(name: impl Into<ToolName>) -> ToolResult {
        Self {
            name: name.into(),
            call_id: None,
            content: String::default(),
            is_error: false,
        }
    }

    pub fn success(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.is_error = false;
        self
    }

    pub fn failure(mut self, err: anyhow::Error) -> Self {
        let mut output = format!("Error: {} lookup failed.", self.name);

        for cause in err.chain() {
            output.push_str(&format!("\nCaused by: {cause}"));
        }

        self.content = output;
        self.is_error = true;
        self
    }
}

impl From<&ToolCallFull> for ToolResult {
    fn from(value: &ToolCallFull) -> Self {
        Self {
            name: value.name.clone(),
            call_id: value.call_id.clone(),
            content: String::default(),
            is_error: false,
        }
    }
}
