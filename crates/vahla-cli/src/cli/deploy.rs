//! The deploy command: simulator run, progress rendering, installer drop.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use vahla_core::cart::CartStore;
use vahla_core::deploy::{DeployDriver, DeployHandle, DeployRun};
use vahla_core::installer::{installer_filename, render_installer};
use vahla_types::agent::AgentDraft;
use vahla_types::error::DeployError;

use crate::state::AppState;

/// Delay between the terminal log line and the installer write, so the
/// success beat lands before the file drops.
const INSTALLER_DELAY: Duration = Duration::from_secs(1);

/// Run the full deployment pipeline: guard, simulate, emit installer.
pub async fn run_deploy(
    state: &AppState,
    output: Option<PathBuf>,
    yes: bool,
    json: bool,
) -> Result<()> {
    let draft = state
        .cart_store
        .load()
        .await
        .context("failed to load cart draft")?
        .unwrap_or_else(|| AgentDraft::new(super::cart::DEFAULT_AGENT_NAME));

    let handle = match DeployDriver::new().start(&draft) {
        Ok(handle) => handle,
        Err(DeployError::EmptyCart) => {
            println!();
            println!(
                "  {} Nothing to deploy. Add a skill with: {}",
                style("!").yellow().bold(),
                style("vahla cart add <name> --install \"<cmd>\"").yellow()
            );
            println!();
            return Err(DeployError::EmptyCart.into());
        }
    };

    let snapshot = handle.snapshot().clone();

    let run = if json {
        // No progress rendering; just wait for the terminal state.
        handle.wait().await
    } else {
        render_run(handle).await?
    };

    if !run.is_complete() {
        // Abandoned mid-flight (Ctrl-C): leave the cart intact.
        return Ok(());
    }

    tokio::time::sleep(INSTALLER_DELAY).await;

    let script = render_installer(&snapshot.agent_name, &snapshot.skills);
    let filename = installer_filename(&snapshot.agent_name);

    let out_dir = match output.or_else(|| state.config.output_dir.clone().map(PathBuf::from)) {
        Some(dir) => {
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            dir
        }
        None => std::env::current_dir().context("cannot resolve current directory")?,
    };

    let path = out_dir.join(&filename);
    tokio::fs::write(&path, &script)
        .await
        .with_context(|| format!("failed to write installer {}", path.display()))?;
    tracing::debug!(path = %path.display(), "installer written");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "run": run,
                "installer": path,
            }))?
        );
        state.cart_store.clear().await?;
        return Ok(());
    }

    println!();
    println!(
        "  {} Installer written to {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );
    println!();

    // Acknowledgment clears the cart; declining keeps the draft for
    // another run.
    if yes
        || Confirm::new()
            .with_prompt("Deployment acknowledged -- clear the cart?")
            .default(true)
            .interact()?
    {
        state.cart_store.clear().await?;
    }

    Ok(())
}

/// Render live run snapshots: progress bar plus narrative log lines.
///
/// Returns the final run state; on Ctrl-C the run is abandoned and the
/// last observed (incomplete) state is returned.
async fn render_run(handle: DeployHandle) -> Result<DeployRun> {
    println!();
    println!(
        "  {}",
        style(format!("DEPLOYING: {}", handle.snapshot().agent_name.to_uppercase()))
            .cyan()
            .bold()
    );
    println!();

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.yellow} {percent:>3}%  {msg}")
            .unwrap(),
    );

    let mut updates = handle.updates.clone();
    let mut printed = 0usize;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let run = updates.borrow_and_update().clone();
                bar.set_position(run.progress as u64);
                bar.set_message(run.status.to_string());
                for line in &run.logs[printed..] {
                    bar.println(format!("  {}", style(line).green()));
                }
                printed = run.logs.len();
                if run.is_complete() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                handle.abandon();
                bar.abandon();
                println!();
                println!(
                    "  {} Deployment abandoned. Cart left intact.",
                    style("!").yellow().bold()
                );
                println!();
                break;
            }
        }
    }

    let run = handle.wait().await;
    if run.is_complete() {
        bar.finish();
    }
    Ok(run)
}
