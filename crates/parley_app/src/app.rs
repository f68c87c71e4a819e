use std::sync::Arc;

use parley_domain::{ChatHistory, strip_reasoning};
use tracing::{error, info};

use crate::{ChatService, Orchestrator, TemplateEngine, ToolService};

/// Shown to the user, and recorded in history, whenever a turn fails.
pub const FALLBACK_ANSWER: &str = "Sorry, I encountered an error processing your request.";

/// What a turn produced for the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnReply {
    Answer(String),
    /// The turn failed; `cause` is the full error chain for display.
    Failed { cause: String },
}

impl TurnReply {
    /// Text recorded in the history for this reply.
    pub fn content(&self) -> &str {
        match self {
            TurnReply::Answer(answer) => answer,
            TurnReply::Failed { .. } => FALLBACK_ANSWER,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TurnReply::Failed { .. })
    }
}

/// Turn boundary: owns the display history and turns every failure into the
/// fallback answer.
pub struct ParleyApp<S> {
    orchestrator: Orchestrator<S>,
    history: ChatHistory,
    reasoning_marker: String,
}

impl<S: ChatService + ToolService> ParleyApp<S> {
    pub fn new(services: Arc<S>, reasoning_marker: impl Into<String>) -> anyhow::Result<Self> {
        let templates = Arc::new(TemplateEngine::new()?);
        Ok(Self {
            orchestrator: Orchestrator::new(services, templates),
            history: ChatHistory::new(),
            reasoning_marker: reasoning_marker.into(),
        })
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Answers one user message. Never fails: after the call the history has
    /// gained exactly one user record and one assistant record.
    pub async fn run_turn(&mut self, user_text: &str) -> TurnReply {
        self.history.push_user(user_text);

        let reply = match self.answer(user_text).await {
            Ok(answer) => TurnReply::Answer(answer),
            Err(error) => {
                error!(error = ?error, "Turn failed");
                TurnReply::Failed { cause: format!("{error:#}") }
            }
        };

        self.history.push_assistant(reply.content());
        reply
    }

    async fn answer(&self, user_text: &str) -> anyhow::Result<String> {
        let turn = self.orchestrator.run(user_text).await?;
        let answer = strip_reasoning(turn.final_answer()?, &self.reasoning_marker);
        info!(messages = turn.context().messages.len(), "Turn completed");
        Ok(answer.to_string())
    }
}
