//! Application state wiring storage and configuration together.
//!
//! `AppState` holds the concrete store instances used by the CLI commands.
//! The community registry client is constructed explicitly, on demand, so
//! that the deploy flow works without any registry configuration.

use vahla_infra::community::RestCommunityStore;
use vahla_infra::config::{load_global_config, resolve_data_dir, resolve_registry_config};
use vahla_infra::sqlite::cart::SqliteCartStore;
use vahla_infra::sqlite::pool::DatabasePool;
use vahla_types::config::GlobalConfig;
use vahla_types::error::StoreError;

/// Shared application state for CLI commands.
pub struct AppState {
    pub cart_store: SqliteCartStore,
    pub config: GlobalConfig,
}

impl AppState {
    /// Initialize the application state: connect to the DB, load config.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("vahla.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_global_config(&data_dir).await;
        let cart_store = SqliteCartStore::new(db_pool);

        Ok(Self { cart_store, config })
    }

    /// Construct the community registry client.
    ///
    /// Fails immediately when the registry is not configured; only the
    /// `agents` commands ever call this.
    pub fn community_store(&self) -> Result<RestCommunityStore, StoreError> {
        let registry = resolve_registry_config(&self.config)?;
        Ok(RestCommunityStore::new(registry))
    }
}
