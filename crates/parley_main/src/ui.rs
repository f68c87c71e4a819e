use anyhow::{Result, bail};
use colored::Colorize;
use parley_api::{API, DisplayRecord, DisplayRole, TurnReply};
use termimad::MadSkin;
use tracing::debug;

use crate::cli::Cli;
use crate::editor::{ParleyEditor, ReadResult};
use crate::input::{Input, SlashCommand};
use crate::prompt::ParleyPrompt;
use crate::spinner::SpinnerManager;

pub struct UI<A> {
    api: A,
    cli: Cli,
    editor: ParleyEditor,
    prompt: ParleyPrompt,
    spinner: SpinnerManager,
    skin: MadSkin,
}

impl<A: API> UI<A> {
    pub fn init(cli: Cli, api: A) -> Result<Self> {
        let prompt = ParleyPrompt::new(api.environment().model.clone());
        Ok(Self {
            api,
            cli,
            editor: ParleyEditor::new(),
            prompt,
            spinner: SpinnerManager::new(),
            skin: MadSkin::default(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Handle direct prompt if provided
        if let Some(prompt) = self.cli.prompt.clone() {
            let reply = self.chat(&prompt).await?;
            return one_shot_outcome(&reply);
        }

        self.banner();
        debug!(model = %self.api.environment().model, "Interactive session started");

        loop {
            let line = match self.editor.prompt(&self.prompt)? {
                ReadResult::Success(line) => line,
                ReadResult::Empty | ReadResult::Continue => continue,
                ReadResult::Exit => break,
            };

            let input = Input::parse(&line);
            debug!(input = ?input, "Read input");

            match input {
                Input::Command(SlashCommand::Exit | SlashCommand::Quit) => break,
                Input::Command(SlashCommand::History) => self.show_history(),
                Input::Command(SlashCommand::Help) => println!("{}", SlashCommand::usage()),
                Input::Unknown(command) => {
                    eprintln!("{} {}", "Unknown command:".red(), command);
                    println!("{}", SlashCommand::usage());
                }
                Input::Message(text) => {
                    self.chat(&text).await?;
                }
            }
        }

        Ok(())
    }

    async fn chat(&mut self, text: &str) -> Result<TurnReply> {
        self.spinner.start("Thinking...")?;
        let reply = self.api.chat(text).await;
        self.spinner.stop();

        if let TurnReply::Failed { cause } = &reply {
            eprintln!("{} {}", "An error occurred:".red().bold(), cause);
        }
        self.render(reply.content());
        Ok(reply)
    }

    fn banner(&self) {
        let tools = self
            .api
            .tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {}",
            "parley".cyan().bold(),
            format!("model: {}  tools: {}", self.api.environment().model, tools).dimmed()
        );
        println!("{}", "Type /help for commands, Ctrl+D to leave.".dimmed());
    }

    fn show_history(&self) {
        let history = self.api.history();
        if history.is_empty() {
            println!("{}", "No messages yet.".dimmed());
            return;
        }
        for record in history.records() {
            println!("{}", role_label(record));
            self.render(&record.content);
        }
    }

    fn render(&self, content: &str) {
        println!("{}", self.skin.term_text(display_text(content)));
    }
}

fn role_label(record: &DisplayRecord) -> String {
    match record.role {
        DisplayRole::User => "You".green().bold().to_string(),
        DisplayRole::Assistant => "Assistant".cyan().bold().to_string(),
    }
}

/// Blank lines a model leaves before its answer are not shown. Indentation of
/// the first line is kept.
fn display_text(content: &str) -> &str {
    content.trim_start_matches(['\r', '\n'])
}

/// A failed one-shot turn makes the process exit non-zero.
fn one_shot_outcome(reply: &TurnReply) -> Result<()> {
    match reply {
        TurnReply::Answer(_) => Ok(()),
        TurnReply::Failed { .. } => bail!("The question could not be answered"),
    }
}

#[cfg(test)]
mod tests {
    use parley_api::FALLBACK_ANSWER;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_display_text_drops_leading_blank_lines_only() {
        let actual = display_text("\n\n  - a\n  - b\n");
        let expected = "  - a\n  - b\n";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_one_shot_answer_succeeds() {
        let fixture = TurnReply::Answer("Paris.".to_string());
        let actual = one_shot_outcome(&fixture);
        assert!(actual.is_ok());
    }

    #[test]
    fn test_one_shot_failure_is_an_error() {
        let fixture = TurnReply::Failed { cause: "connection refused".to_string() };

        let actual = one_shot_outcome(&fixture).unwrap_err();

        assert_eq!(actual.to_string(), "The question could not be answered");
        assert_eq!(fixture.content(), FALLBACK_ANSWER);
    }
}
