//! Community agents CLI commands: list recent, share the current cart.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use vahla_core::cart::CartStore;
use vahla_core::community::CommunityAgentStore;
use vahla_types::agent::CommunityAgent;

use crate::state::AppState;

/// Community agents subcommands.
#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List the most recently shared community agents.
    #[command(alias = "ls")]
    List,

    /// Share the current cart as a community agent.
    Share {
        /// Attribution name on the shared record.
        #[arg(long, default_value = "anonymous")]
        author: String,
    },
}

/// Handle an agents subcommand.
pub async fn handle_agents_command(cmd: AgentsCommand, state: &AppState, json: bool) -> Result<()> {
    // Registry configuration is fatal up front; a half-configured store
    // must not degrade into "empty list" silently.
    let store = state.community_store()?;

    match cmd {
        AgentsCommand::List => {
            let agents = store.list_recent().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&agents)?);
                return Ok(());
            }

            if agents.is_empty() {
                println!();
                println!(
                    "  {} No community agents found.",
                    style("i").blue().bold()
                );
                println!();
                return Ok(());
            }

            println!();
            println!("{}", agents_table(&agents));
            println!();
        }

        AgentsCommand::Share { author } => {
            let draft = state
                .cart_store
                .load()
                .await
                .context("failed to load cart draft")?
                .context("nothing to share -- the cart is empty")?;

            let agent = CommunityAgent::from_draft(&draft, author)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap(),
            );
            spinner.set_message("Sharing agent...");
            spinner.enable_steady_tick(std::time::Duration::from_millis(80));

            let result = store.save(&agent).await;
            spinner.finish_and_clear();
            result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&agent)?);
                return Ok(());
            }

            println!();
            println!(
                "  {} Shared {} ({} skill{}) as {}",
                style("✓").green().bold(),
                style(&agent.agent_name).cyan(),
                agent.skills.len(),
                if agent.skills.len() == 1 { "" } else { "s" },
                style(&agent.author).dim()
            );
            println!();
        }
    }

    Ok(())
}

/// Render community agents in a colored table.
fn agents_table(agents: &[CommunityAgent]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Agent").fg(Color::White),
        Cell::new("Author").fg(Color::White),
        Cell::new("Skills").fg(Color::White),
        Cell::new("Shared").fg(Color::White),
    ]);

    for agent in agents {
        let skills = agent
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let shared = agent
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&agent.agent_name).fg(Color::Cyan),
            Cell::new(&agent.author),
            Cell::new(skills),
            Cell::new(shared).fg(Color::DarkGrey),
        ]);
    }

    table
}
