mod cli;
mod editor;
mod input;
mod logging;
mod prompt;
mod spinner;
mod ui;

pub use cli::Cli;
pub use logging::init_tracing;
pub use ui::UI;
