use parley_config::Environment;
use parley_domain::{ChatHistory, ToolDefinition};

use crate::TurnReply;

#[async_trait::async_trait]
pub trait API: Send {
    /// Runs one question through the assistant and records it in the
    /// history. Failures come back as [`TurnReply::Failed`].
    async fn chat(&mut self, text: &str) -> TurnReply;

    /// Transcript of every turn so far
    fn history(&self) -> &ChatHistory;

    /// Tools the model may call
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Returns the current environment
    fn environment(&self) -> &Environment;
}
