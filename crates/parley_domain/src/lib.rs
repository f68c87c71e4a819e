mod chat_response;
mod context;
mod error;
mod history;
mod model;
mod reasoning;
mod tool_call;
mod tool_definition;
mod tool_name;
mod tool_result;
mod turn;

pub use chat_response::*;
pub use context::*;
pub use error::*;
pub use history::*;
pub use model::*;
pub use reasoning::*;
pub use tool_call::*;
pub use tool_definition::*;
pub use tool_name::*;
pub use tool_result::*;
pub use turn::*;
