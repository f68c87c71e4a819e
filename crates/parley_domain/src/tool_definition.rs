use derive_setters::Setters;
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};

use crate::ToolName;

/// Signature of a tool as advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Setters)]
#[setters(into)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: String,
    pub input_schema: Schema,
}

impl ToolDefinition {
    pub fn new<N: ToString>(name: N) -> Self {
        ToolDefinition {
            name: ToolName::new(name),
            description: String::new(),
            input_schema: schemars::schema_for!(()),
        }
    }

    /// Derives the input schema from the tool's argument type.
    pub fn with_input<T: JsonSchema>(self) -> Self {
        self.input_schema(schemars::schema_for!(T))
    }
}
