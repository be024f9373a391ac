//! Cart management CLI commands: add, remove, list, clear, plus agent
//! naming.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use vahla_core::cart::CartStore;
use vahla_types::agent::AgentDraft;
use vahla_types::skill::Skill;

use crate::state::AppState;

/// Agent name used before the user picks one.
pub const DEFAULT_AGENT_NAME: &str = "Agent";

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a skill to the cart.
    Add {
        /// Skill display name.
        name: String,

        /// Shell command that installs the skill.
        #[arg(long)]
        install: String,
    },

    /// Remove a skill from the cart by name.
    #[command(alias = "rm")]
    Remove {
        /// Skill name to remove.
        name: String,
    },

    /// List the cart contents.
    #[command(alias = "ls")]
    List,

    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Load the saved draft, or start a fresh one with the default agent name.
async fn load_or_new(state: &AppState) -> Result<AgentDraft> {
    let draft = state
        .cart_store
        .load()
        .await
        .context("failed to load cart draft")?;
    Ok(draft.unwrap_or_else(|| AgentDraft::new(DEFAULT_AGENT_NAME)))
}

/// Handle a cart subcommand.
pub async fn handle_cart_command(cmd: CartCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        CartCommand::Add { name, install } => {
            let mut draft = load_or_new(state).await?;
            draft.add_skill(Skill::new(name.clone(), install))?;
            state.cart_store.save(&draft).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&draft)?);
                return Ok(());
            }

            println!();
            println!(
                "  {} Added {} ({} skill{} in cart)",
                style("✓").green().bold(),
                style(&name).cyan(),
                draft.skills.len(),
                if draft.skills.len() == 1 { "" } else { "s" }
            );
            println!();
        }

        CartCommand::Remove { name } => {
            let mut draft = load_or_new(state).await?;
            draft.remove_skill(&name)?;
            state.cart_store.save(&draft).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&draft)?);
                return Ok(());
            }

            println!();
            println!("  {} Removed {}", style("✓").green().bold(), style(&name).cyan());
            println!();
        }

        CartCommand::List => {
            let draft = load_or_new(state).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&draft)?);
                return Ok(());
            }

            if draft.is_empty() {
                println!();
                println!(
                    "  {} Cart is empty. Add a skill with: {}",
                    style("i").blue().bold(),
                    style("vahla cart add <name> --install \"<cmd>\"").yellow()
                );
                println!();
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec![
                Cell::new("#").fg(Color::White),
                Cell::new("Skill").fg(Color::White),
                Cell::new("Install Command").fg(Color::White),
            ]);

            for (i, skill) in draft.skills.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(format!("{:02}", i + 1)).fg(Color::DarkGrey),
                    Cell::new(&skill.name).fg(Color::Cyan),
                    Cell::new(&skill.install_command),
                ]);
            }

            println!();
            println!("  Agent: {}", style(draft.agent_name.to_uppercase()).cyan().bold());
            println!();
            println!("{table}");
            println!();
        }

        CartCommand::Clear { force } => {
            let draft = load_or_new(state).await?;

            if !force
                && !draft.is_empty()
                && !Confirm::new()
                    .with_prompt(format!("Remove all {} skills from the cart?", draft.skills.len()))
                    .default(false)
                    .interact()?
            {
                return Ok(());
            }

            state.cart_store.clear().await?;

            if json {
                println!("{}", serde_json::json!({ "cleared": true }));
                return Ok(());
            }

            println!();
            println!("  {} Cart cleared", style("✓").green().bold());
            println!();
        }
    }

    Ok(())
}

/// Set the agent name on the current draft (creating the draft if needed).
pub async fn set_agent_name(state: &AppState, name: &str, json: bool) -> Result<()> {
    anyhow::ensure!(!name.trim().is_empty(), "agent name cannot be empty");

    let mut draft = load_or_new(state).await?;
    draft.agent_name = name.trim().to_string();
    draft.updated_at = chrono::Utc::now();
    state.cart_store.save(&draft).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Agent name set to {}",
        style("✓").green().bold(),
        style(draft.agent_name.to_uppercase()).cyan().bold()
    );
    println!();

    Ok(())
}
