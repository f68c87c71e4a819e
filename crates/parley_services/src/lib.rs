mod registry;
mod tool;
mod tools;
mod truncate;

pub use registry::ToolRegistry;
pub use tool::{ExecutableTool, NamedTool, QueryInput, Tool, ToolDescription};
pub use tools::{Arxiv, Tavily, Wikipedia};
