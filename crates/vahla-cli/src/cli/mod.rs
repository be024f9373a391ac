//! CLI command definitions and dispatch for the `vahla` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! noun-verb pattern (e.g., `vahla cart add`, `vahla agents list`).

pub mod cart;
pub mod community;
pub mod deploy;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Assemble and deploy VAHLA agent units.
#[derive(Parser)]
#[command(name = "vahla", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the skill cart.
    Cart {
        #[command(subcommand)]
        action: cart::CartCommand,
    },

    /// Set the agent name for the current draft.
    Name {
        /// Agent name (display is uppercased; the installer filename is
        /// derived from the lowercased, hyphenated form).
        name: String,
    },

    /// Run the deployment pipeline and emit the installer script.
    Deploy {
        /// Directory to write the installer into (default: output_dir
        /// from config.toml, falling back to the current directory).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the completion prompt and clear the cart immediately.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Browse and share community agents.
    Agents {
        #[command(subcommand)]
        action: community::AgentsCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
