use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, EditCommand, Emacs, FileBackedHistory, KeyCode,
    KeyModifiers, Keybindings, MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu,
    Signal, Span, Suggestion, default_emacs_keybindings,
};
use strum::{EnumMessage, IntoEnumIterator};

use crate::input::SlashCommand;

const COMMAND_MENU: &str = "command_menu";

/// Line editor for questions. Slash commands complete on Tab; history lives
/// only as long as the session.
pub struct ParleyEditor {
    editor: Reedline,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReadResult {
    Success(String),
    Empty,
    Continue,
    Exit,
}

/// Completes slash commands typed at the start of the line.
#[derive(Default)]
struct CommandCompleter;

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let typed = &line[..pos.min(line.len())];
        if !typed.starts_with('/') || typed.contains(char::is_whitespace) {
            return Vec::new();
        }

        SlashCommand::iter()
            .filter(|command| format!("/{command}").starts_with(typed))
            .map(|command| Suggestion {
                value: format!("/{command}"),
                description: command.get_message().map(str::to_string),
                span: Span::new(0, typed.len()),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}

fn keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    let bindings = [
        (KeyModifiers::CONTROL, KeyCode::Char('l'), ReedlineEvent::ClearScreen),
        (KeyModifiers::CONTROL, KeyCode::Char('r'), ReedlineEvent::SearchHistory),
        (
            KeyModifiers::ALT,
            KeyCode::Enter,
            ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
        ),
        (
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMMAND_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        ),
    ];
    for (modifiers, key, event) in bindings {
        keybindings.add_binding(modifiers, key, event);
    }
    keybindings
}

impl ParleyEditor {
    pub fn new() -> Self {
        let menu = ColumnarMenu::default().with_name(COMMAND_MENU);
        let hinter = DefaultHinter::default().with_style(Style::new().fg(Color::DarkGray));

        let editor = Reedline::create()
            .with_history(Box::new(FileBackedHistory::default()))
            .with_hinter(Box::new(hinter))
            .with_completer(Box::new(CommandCompleter))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings())))
            .with_ansi_colors(true);
        Self { editor }
    }

    /// Blocks until the user submits a line or leaves.
    pub fn prompt(&mut self, prompt: &dyn Prompt) -> anyhow::Result<ReadResult> {
        let signal = self.editor.read_line(prompt)?;
        Ok(signal.into())
    }
}

impl From<Signal> for ReadResult {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Success(buffer) => match buffer.trim() {
                "" => ReadResult::Empty,
                line => ReadResult::Success(line.to_string()),
            },
            Signal::CtrlC => ReadResult::Continue,
            Signal::CtrlD => ReadResult::Exit,
        }
    }
}
