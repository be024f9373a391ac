//! Installer script generation.
//!
//! Once a run reaches its terminal state, the cart snapshot is rendered
//! into a single `.bat` installer chaining every skill's install command
//! with the ClawSec hardening step. Rendering is pure; writing the file
//! is the caller's side effect and must happen exactly once per completed
//! deployment.

use vahla_types::skill::Skill;

/// Hardening sub-command chained after every skill install.
pub const HARDENING_COMMAND: &str = "npx clawsec install";

/// First banner line of the generated script.
const BANNER: &str = "VAHLA AGENT DEPLOYMENT SYSTEM";

const RULE: &str = "====================================================";

/// Render the installer script for a frozen cart snapshot.
///
/// One module block per skill, in cart order, 1-indexed with two-digit
/// zero-padded numbering. Install commands are emitted verbatim -- the
/// generator does no validation of the skill data it receives.
pub fn render_installer(agent_name: &str, skills: &[Skill]) -> String {
    let mut script = String::new();
    script.push_str("@echo off\n");
    script.push_str("color 0E\n");
    script.push_str(&format!("echo {RULE}\n"));
    script.push_str(&format!("echo   {BANNER}\n"));
    script.push_str(&format!("echo   AGENT: {}\n", agent_name.to_uppercase()));
    script.push_str(&format!("echo {RULE}\n"));

    for (i, skill) in skills.iter().enumerate() {
        let module = i + 1;
        script.push('\n');
        script.push_str(&format!("echo [MODULE {module:02}] Injecting {}...\n", skill.name));
        script.push_str(&format!("{} && {HARDENING_COMMAND}\n", skill.install_command));
        script.push_str(&format!("echo [MODULE {module:02}] Hardened and Secured.\n"));
    }

    script.push('\n');
    script.push_str(&format!("echo {RULE}\n"));
    script.push_str("echo   DEPLOYMENT COMPLETE. UNIT IS OPERATIONAL.\n");
    script.push_str(&format!("echo {RULE}\n"));
    script.push_str("pause\n");
    script
}

/// Derive the installer filename from the agent name.
///
/// Lowercased, with whitespace runs collapsed to single hyphens. Other
/// characters pass through untouched; collision handling is left to
/// whatever saves the file.
pub fn installer_filename(agent_name: &str) -> String {
    let slug = agent_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("deploy-{slug}.bat")
}
