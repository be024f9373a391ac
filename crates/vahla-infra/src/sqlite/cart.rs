//! SQLite cart store implementation.
//!
//! Implements `CartStore` from `vahla-core` with a single-row table
//! holding the serialized draft. The `schema_version` column enables
//! forward-compatible deserialization if the draft shape changes in a
//! future release.

use sqlx::Row;

use vahla_core::cart::CartStore;
use vahla_types::agent::AgentDraft;
use vahla_types::error::RepositoryError;

use super::pool::DatabasePool;

/// Current serialization schema for `draft_json`.
const DRAFT_SCHEMA_VERSION: i64 = 1;

/// SQLite-backed implementation of `CartStore`.
pub struct SqliteCartStore {
    pool: DatabasePool,
}

impl SqliteCartStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl CartStore for SqliteCartStore {
    async fn load(&self) -> Result<Option<AgentDraft>, RepositoryError> {
        let row = sqlx::query("SELECT draft_json FROM cart_draft WHERE id = 1")
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let json: String = row
            .try_get("draft_json")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let draft: AgentDraft = serde_json::from_str(&json)
            .map_err(|e| RepositoryError::Query(format!("invalid draft JSON: {e}")))?;

        Ok(Some(draft))
    }

    async fn save(&self, draft: &AgentDraft) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(draft)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO cart_draft (id, draft_json, schema_version, updated_at)
             VALUES (1, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 draft_json = excluded.draft_json,
                 schema_version = excluded.schema_version,
                 updated_at = excluded.updated_at",
        )
        .bind(&json)
        .bind(DRAFT_SCHEMA_VERSION)
        .bind(draft.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_draft WHERE id = 1")
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
