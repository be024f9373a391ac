//! Global configuration types for VAHLA.
//!
//! `GlobalConfig` represents the top-level `config.toml` that holds the
//! community registry connection and installer output settings.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the VAHLA CLI.
///
/// Loaded from `~/.vahla/config.toml`. All fields are optional; the
/// registry section may instead come from environment variables, which
/// take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Community registry connection. Absent means "not configured" --
    /// commands touching the registry will fail at construction.
    #[serde(default)]
    pub registry: Option<RegistryConfig>,

    /// Directory where generated installer scripts are written.
    /// Defaults to the current working directory when unset.
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Connection settings for the community registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the registry (e.g., "https://xyz.supabase.co").
    pub base_url: String,
    /// Access key sent as `apikey` and bearer token.
    pub api_key: String,
}
