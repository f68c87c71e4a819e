// Scenario tests for this module live in: orch_spec/
use std::sync::Arc;

use anyhow::Context as _;
use futures::future::join_all;
use parley_domain::{Turn, TurnState};
use tracing::{debug, info};

use crate::synthesis::SynthesisPrompt;
use crate::{ChatService, TemplateEngine, ToolService};

/// Drives one turn through `Deciding`, the optional tool round trip and
/// `Synthesizing` until it reaches `Done`.
pub struct Orchestrator<S> {
    services: Arc<S>,
    templates: Arc<TemplateEngine>,
}

impl<S> Clone for Orchestrator<S> {
    fn clone(&self) -> Self {
        Self { services: self.services.clone(), templates: self.templates.clone() }
    }
}

impl<S: ChatService + ToolService> Orchestrator<S> {
    pub fn new(services: Arc<S>, templates: Arc<TemplateEngine>) -> Self {
        Self { services, templates }
    }

    /// Runs a fresh turn for `user_text`. The returned turn is always in the
    /// `Done` state.
    pub async fn run(&self, user_text: &str) -> anyhow::Result<Turn> {
        let mut turn = Turn::new(user_text, self.services.definitions());

        loop {
            debug!(state = %turn.state(), "Advancing turn");
            match turn.state().clone() {
                TurnState::Deciding => self.decide(&mut turn).await?,
                TurnState::ToolDispatch => self.dispatch(&mut turn).await?,
                TurnState::Synthesizing => self.synthesize(&mut turn).await?,
                TurnState::Done { .. } => break,
            }
        }

        Ok(turn)
    }

    async fn decide(&self, turn: &mut Turn) -> anyhow::Result<()> {
        let message = self
            .services
            .chat(turn.context())
            .await
            .context("Model endpoint failed while deciding")?;

        info!(
            tool_calls = message.tool_calls.len(),
            finish_reason = ?message.finish_reason,
            "Model decided"
        );
        turn.record_decision(message)?;
        Ok(())
    }

    async fn dispatch(&self, turn: &mut Turn) -> anyhow::Result<()> {
        let calls = turn.pending_tool_calls().to_vec();
        let results = join_all(calls.into_iter().map(|call| self.services.call(call))).await;

        let failed = results.iter().filter(|result| result.is_error).count();
        info!(count = results.len(), failed, "Tool calls completed");

        turn.record_tool_results(results)?;
        Ok(())
    }

    async fn synthesize(&self, turn: &mut Turn) -> anyhow::Result<()> {
        let prompt = SynthesisPrompt::from_context(turn.context()).render(&self.templates)?;
        let answer = self
            .services
            .prompt(&prompt)
            .await
            .context("Model endpoint failed while synthesizing")?;

        turn.record_synthesis(answer)?;
        Ok(())
    }
}
