//! VAHLA CLI entry point.
//!
//! Binary name: `vahla`
//!
//! Parses CLI arguments, initializes the database and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,vahla=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "vahla", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, config)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Cart { action } => {
            cli::cart::handle_cart_command(action, &state, cli.json).await?;
        }

        Commands::Name { name } => {
            cli::cart::set_agent_name(&state, &name, cli.json).await?;
        }

        Commands::Deploy { output, yes } => {
            cli::deploy::run_deploy(&state, output, yes, cli.json).await?;
        }

        Commands::Agents { action } => {
            cli::community::handle_agents_command(action, &state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
