use std::str::FromStr;

use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString};

/// Slash commands understood by the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumMessage, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SlashCommand {
    #[strum(message = "Leave the chat")]
    Exit,
    #[strum(message = "Leave the chat")]
    Quit,
    #[strum(message = "Show every message of this session")]
    History,
    #[strum(message = "List the available commands")]
    Help,
}

impl SlashCommand {
    /// One line per command, for `/help`.
    pub fn usage() -> String {
        SlashCommand::iter()
            .map(|command| {
                format!(
                    "/{:<8} {}",
                    command.to_string(),
                    command.get_message().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(SlashCommand),
    Unknown(String),
    Message(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.strip_prefix('/') {
            Some(name) => SlashCommand::from_str(name.trim())
                .map(Input::Command)
                .unwrap_or_else(|_| Input::Unknown(line.to_string())),
            None => Input::Message(line.to_string()),
        }
    }
}
