mod api;
mod parley_api;
mod services;

pub use api::*;
pub use parley_api::*;
pub use parley_app::{FALLBACK_ANSWER, TurnReply};
pub use parley_config::Environment;
pub use parley_domain::{ChatHistory, DisplayRecord, DisplayRole, ToolDefinition};
pub use services::ParleyServices;
