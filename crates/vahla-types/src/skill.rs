//! Skill domain types.
//!
//! A skill is an opaque external unit from the marketplace catalog: a display
//! name plus a shell install command. VAHLA never inspects or validates the
//! command -- it only chains it into the generated installer.

use serde::{Deserialize, Serialize};

/// A marketplace skill selected into a cart.
///
/// Skills are immutable once added to a cart. The install command is an
/// opaque string assumed runnable on the target machine; it is emitted
/// into the installer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Display name ("Neural Uplink", "Threat Scanner").
    pub name: String,
    /// Shell command that installs the skill on the target machine.
    pub install_command: String,
}

impl Skill {
    /// Create a new skill from a name and install command.
    pub fn new(name: impl Into<String>, install_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            install_command: install_command.into(),
        }
    }
}
