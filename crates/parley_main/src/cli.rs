use clap::Parser;

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Direct prompt to process without entering interactive mode.
    ///
    /// The answer is printed and the process exits.
    #[arg(long, short = 'p')]
    pub prompt: Option<String>,

    /// Enable verbose output mode.
    ///
    /// Raises the log level of the assistant's own crates to debug. Logs are
    /// written to stderr; `RUST_LOG` takes precedence when set.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Model identifier to use instead of the configured one.
    #[arg(long, short = 'm')]
    pub model: Option<String>,
}
