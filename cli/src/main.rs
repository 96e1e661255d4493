use anyhow::{Context, Result};
use assetscan_cli::state::AppState;
use assetscan_cli::{dispatch, error, init_tracing, Cli};
use assetscan_core::AppConfig;
use clap::Parser;
use std::process::ExitCode;

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_with_env().context("Failed to load configuration")?;
    let state = AppState::new(config)?;
    let mut stdout = std::io::stdout();
    dispatch(&state, cli.command, &mut stdout).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Starting assetscan v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(hint) = error::hint(&e) {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
