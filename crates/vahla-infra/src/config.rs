//! Configuration loading for VAHLA.
//!
//! Reads `config.toml` from the data directory (`~/.vahla/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when
//! the file is missing or malformed. Registry connection settings resolve
//! environment-first, then config file; absence is a fatal error for any
//! code path touching the registry.

use std::path::{Path, PathBuf};

use vahla_types::config::{GlobalConfig, RegistryConfig};
use vahla_types::error::StoreError;

/// Environment variable naming the registry base URL.
pub const STORE_URL_ENV: &str = "VAHLA_STORE_URL";

/// Environment variable naming the registry access key.
pub const STORE_KEY_ENV: &str = "VAHLA_STORE_KEY";

/// Resolve the VAHLA data directory.
///
/// `VAHLA_DATA_DIR` wins; otherwise `~/.vahla`, falling back to a
/// relative `.vahla` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VAHLA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".vahla");
    }

    PathBuf::from(".vahla")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the registry connection settings.
///
/// Priority:
/// 1. `VAHLA_STORE_URL` + `VAHLA_STORE_KEY` environment variables (both
///    must be set and non-empty)
/// 2. The `[registry]` section of `config.toml`
///
/// Missing settings are a fatal configuration error, surfaced immediately
/// at construction rather than on first request.
pub fn resolve_registry_config(global: &GlobalConfig) -> Result<RegistryConfig, StoreError> {
    let env_url = std::env::var(STORE_URL_ENV).ok().filter(|s| !s.is_empty());
    let env_key = std::env::var(STORE_KEY_ENV).ok().filter(|s| !s.is_empty());

    if let (Some(base_url), Some(api_key)) = (env_url, env_key) {
        return Ok(RegistryConfig { base_url, api_key });
    }

    if let Some(registry) = &global.registry {
        return Ok(registry.clone());
    }

    Err(StoreError::Config(format!(
        "set {STORE_URL_ENV} and {STORE_KEY_ENV}, or add a [registry] section to config.toml"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert!(config.registry.is_none());
        assert!(config.output_dir.is_none());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
output_dir = "/tmp/deploys"

[registry]
base_url = "https://example.supabase.co"
api_key = "anon-key"
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.output_dir.as_deref(), Some("/tmp/deploys"));
        assert_eq!(
            config.registry.as_ref().unwrap().base_url,
            "https://example.supabase.co"
        );
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert!(config.registry.is_none());
    }

    #[test]
    fn resolve_registry_config_from_file() {
        let global = GlobalConfig {
            registry: Some(RegistryConfig {
                base_url: "https://example.supabase.co".to_string(),
                api_key: "anon-key".to_string(),
            }),
            output_dir: None,
        };
        let registry = resolve_registry_config(&global).unwrap();
        assert_eq!(registry.base_url, "https://example.supabase.co");
        assert_eq!(registry.api_key, "anon-key");
    }

    #[test]
    fn resolve_registry_config_missing_is_fatal() {
        let err = resolve_registry_config(&GlobalConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.to_string().contains(STORE_URL_ENV));
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("VAHLA_DATA_DIR", "/tmp/test-vahla");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-vahla"));
        unsafe {
            std::env::remove_var("VAHLA_DATA_DIR");
        }
    }
}
