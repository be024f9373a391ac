//! Deployment run status.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Coarse, UI-facing label for the simulation's current stage.
///
/// Distinct from the fine-grained phase counter inside the simulator:
/// the status drives iconography and coloring, while phases gate one-shot
/// narrative log lines. Two consecutive phases can share a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Compiling,
    Securing,
    Complete,
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStatus::Compiling => write!(f, "compiling"),
            DeployStatus::Securing => write!(f, "securing"),
            DeployStatus::Complete => write!(f, "complete"),
        }
    }
}

impl FromStr for DeployStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compiling" => Ok(DeployStatus::Compiling),
            "securing" => Ok(DeployStatus::Securing),
            "complete" => Ok(DeployStatus::Complete),
            other => Err(format!("invalid deploy status: '{other}'")),
        }
    }
}

impl Default for DeployStatus {
    fn default() -> Self {
        DeployStatus::Compiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_round_trip() {
        for status in [
            DeployStatus::Compiling,
            DeployStatus::Securing,
            DeployStatus::Complete,
        ] {
            let parsed: DeployStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&DeployStatus::Securing).unwrap();
        assert_eq!(json, "\"securing\"");
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!("provisioning".parse::<DeployStatus>().is_err());
    }
}
