use derive_setters::Setters;
use parley_domain::{Context, ContextMessage, ToolCallFull, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Default, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct Request {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
    #[default]
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub r#type: FunctionType,
    pub function: FunctionCall,
}

/// Arguments travel as a JSON-encoded string on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub r#type: FunctionType,
    pub function: FunctionDescription,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
}

impl From<ToolDefinition> for Tool {
    fn from(value: ToolDefinition) -> Self {
        Tool {
            r#type: FunctionType::Function,
            function: FunctionDescription {
                name: value.name.into_string(),
                description: value.description,
                parameters: value.input_schema.to_value(),
            },
        }
    }
}

impl From<ToolCallFull> for ToolCall {
    fn from(value: ToolCallFull) -> Self {
        let arguments = match value.arguments {
            Value::Null => "{}".to_string(),
            arguments => arguments.to_string(),
        };
        Self {
            id: value.call_id.map(|id| id.as_str().to_string()),
            r#type: FunctionType::Function,
            function: FunctionCall { name: value.name.into_string(), arguments },
        }
    }
}

impl From<ContextMessage> for Message {
    fn from(value: ContextMessage) -> Self {
        match value {
            ContextMessage::User(message) => Message {
                role: Role::User,
                content: Some(message.content),
                tool_calls: None,
                tool_call_id: None,
                name: None,
            },
            ContextMessage::Assistant(message) => {
                let tool_calls = (!message.tool_calls.is_empty())
                    .then(|| message.tool_calls.into_iter().map(ToolCall::from).collect());
                let content = if message.content.is_empty() && tool_calls.is_some() {
                    None
                } else {
                    Some(message.content)
                };
                Message {
                    role: Role::Assistant,
                    content,
                    tool_calls,
                    tool_call_id: None,
                    name: None,
                }
            }
            ContextMessage::Tool(result) => Message {
                role: Role::Tool,
                content: Some(result.content),
                tool_calls: None,
                tool_call_id: result.call_id.map(|id| id.as_str().to_string()),
                name: Some(result.name.into_string()),
            },
        }
    }
}

impl From<Context> for Request {
    fn from(value: Context) -> Self {
        let tools: Vec<Tool> = value.tools.into_iter().map(Tool::from).collect();
        let has_tools = !tools.is_empty();

        Request {
            messages: value.messages.into_iter().map(Message::from).collect(),
            tools: has_tools.then_some(tools),
            tool_choice: has_tools.then_some(ToolChoice::Auto),
            ..Default::default()
        }
    }
}
