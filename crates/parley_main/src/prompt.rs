use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

const MULTILINE_INDICATOR: &str = "::: ";
const RIGHT_CHEVRON: &str = "❯";

/// Prompt shown before each question. The right side names the model.
#[derive(Clone)]
pub struct ParleyPrompt {
    model: String,
}

impl ParleyPrompt {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

impl Prompt for ParleyPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(Style::new().fg(Color::Cyan).bold().paint("PARLEY").to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Owned(Style::new().fg(Color::DarkGray).paint(&self.model).to_string())
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Owned(format!(" {} ", Style::new().fg(Color::LightGreen).paint(RIGHT_CHEVRON)))
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(MULTILINE_INDICATOR)
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
