use strum_macros::Display;

use crate::{
    ChatCompletionMessage, Context, ContextMessage, Error, Result, ToolCallFull, ToolDefinition,
    ToolResult,
};

/// Stage of a single turn. A turn always starts in `Deciding` and ends in
/// `Done`; tool dispatch and synthesis only happen when the model asked for a
/// tool.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum TurnState {
    Deciding,
    ToolDispatch,
    Synthesizing,
    /// Terminal. `answer` indexes the assistant message that answers the turn.
    Done { answer: Option<usize> },
}

/// Conversation state of one user turn together with the stage it is in.
///
/// Transitions are only possible through the `record_*` methods, each of
/// which is valid in exactly one state.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    context: Context,
    state: TurnState,
}

impl Turn {
    /// Starts a turn seeded with the triggering user message.
    pub fn new(user_text: impl ToString, tools: Vec<ToolDefinition>) -> Self {
        let context = Context::default()
            .tools(tools)
            .add_message(ContextMessage::user(user_text));
        Self { context, state: TurnState::Deciding }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Text of the user message that opened the turn.
    pub fn question(&self) -> &str {
        self.context.first_user_message().unwrap_or_default()
    }

    pub fn pending_tool_calls(&self) -> &[ToolCallFull] {
        self.context.pending_tool_calls()
    }

    /// Appends the model's decision. Moves to `ToolDispatch` when the message
    /// requests tools and straight to `Done` otherwise.
    pub fn record_decision(&mut self, message: ChatCompletionMessage) -> Result<()> {
        self.expect_state(TurnState::Deciding, "record a decision")?;

        let requests_tools = message.has_tool_call();
        self.append(ContextMessage::assistant(message.content, message.tool_calls));

        self.state = if requests_tools {
            TurnState::ToolDispatch
        } else {
            TurnState::Done { answer: Some(self.context.messages.len() - 1) }
        };
        Ok(())
    }

    /// Appends one result per pending tool call, in request order.
    pub fn record_tool_results(&mut self, results: Vec<ToolResult>) -> Result<()> {
        self.expect_state(TurnState::ToolDispatch, "record tool results")?;

        let expected = self.pending_tool_calls().len();
        if results.len() != expected {
            return Err(Error::ToolResultMismatch { expected, actual: results.len() });
        }

        self.context = std::mem::take(&mut self.context).add_tool_results(results);
        self.state = TurnState::Synthesizing;
        Ok(())
    }

    /// Appends the synthesized answer. It never carries tool calls.
    pub fn record_synthesis(&mut self, text: impl ToString) -> Result<()> {
        self.expect_state(TurnState::Synthesizing, "record a synthesis")?;

        self.append(ContextMessage::assistant(text, Vec::new()));
        self.state = TurnState::Done { answer: Some(self.context.messages.len() - 1) };
        Ok(())
    }

    /// The answer-bearing message of a finished turn.
    ///
    /// # Errors
    /// [`Error::MissingFinalAnswer`] when the turn is not done or its answer
    /// is not a tool-call-free assistant message.
    pub fn final_answer(&self) -> Result<&str> {
        let TurnState::Done { answer: Some(index) } = self.state else {
            return Err(Error::MissingFinalAnswer);
        };

        match self.context.messages.get(index) {
            Some(ContextMessage::Assistant(message)) if !message.has_tool_call() => {
                Ok(&message.content)
            }
            _ => Err(Error::MissingFinalAnswer),
        }
    }

    fn append(&mut self, message: ContextMessage) {
        self.context = std::mem::take(&mut self.context).add_message(message);
    }

    fn expect_state(&self, expected: TurnState, action: &'static str) -> Result<()> {
        if std::mem::discriminant(&self.state) == std::mem::discriminant(&expected) {
            Ok(())
        } else {
            Err(Error::InvalidTransition { action, state: self.state.to_string() })
        }
    }
}
