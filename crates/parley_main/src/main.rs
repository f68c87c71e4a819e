use anyhow::{Context, Result};
use clap::Parser;
use parley::{Cli, UI, init_tracing};
use parley_api::{Environment, ParleyAPI};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configuration problems are fatal before any turn is served
    let mut env = Environment::from_env().context("Failed to load configuration")?;
    if let Some(model) = cli.model.clone() {
        env.model = model;
    }

    let api = ParleyAPI::init(env)?;
    let mut ui = UI::init(cli, api)?;
    ui.run().await
}
