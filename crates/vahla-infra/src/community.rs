//! Community registry HTTP client.
//!
//! Implements `CommunityAgentStore` against a PostgREST-style endpoint:
//! the `community_agents` collection lives under `/rest/v1/` and is
//! authenticated with an access key sent both as `apikey` header and
//! bearer token.
//!
//! Failure contracts mirror the trait: reads degrade to an empty list
//! with a warning, writes propagate.

use tracing::warn;

use vahla_core::community::{CommunityAgentStore, RECENT_AGENTS_LIMIT};
use vahla_types::agent::CommunityAgent;
use vahla_types::config::RegistryConfig;
use vahla_types::error::StoreError;

/// HTTP client for the community registry.
pub struct RestCommunityStore {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

impl RestCommunityStore {
    /// Create a client from resolved registry settings.
    pub fn new(config: RegistryConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("vahla-cli/0.1")
            .build()
            .unwrap_or_default();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        }
    }

    /// URL of the `community_agents` collection.
    fn collection_url(&self) -> String {
        format!("{}/rest/v1/community_agents", self.base_url)
    }

    /// URL of the recent-agents listing query.
    fn recent_url(&self) -> String {
        format!(
            "{}?select=*&order=created_at.desc&limit={}",
            self.collection_url(),
            RECENT_AGENTS_LIMIT
        )
    }

    /// Fetch the recent agents, surfacing transport errors.
    async fn fetch_recent(&self) -> Result<Vec<CommunityAgent>, StoreError> {
        let agents = self
            .http
            .get(self.recent_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        Ok(agents)
    }
}

impl CommunityAgentStore for RestCommunityStore {
    async fn list_recent(&self) -> Vec<CommunityAgent> {
        match self.fetch_recent().await {
            Ok(agents) => agents,
            Err(e) => {
                warn!(error = %e, "failed to fetch community agents, listing as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, agent: &CommunityAgent) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.collection_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(agent)
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(body));
        }

        response.error_for_status().map_err(transport)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vahla_types::agent::AgentDraft;
    use vahla_types::skill::Skill;

    fn store_at(base_url: &str) -> RestCommunityStore {
        RestCommunityStore::new(RegistryConfig {
            base_url: base_url.to_string(),
            api_key: "anon-key".to_string(),
        })
    }

    #[test]
    fn test_collection_url_trims_trailing_slash() {
        let store = store_at("https://example.supabase.co/");
        assert_eq!(
            store.collection_url(),
            "https://example.supabase.co/rest/v1/community_agents"
        );
    }

    #[test]
    fn test_recent_url_orders_and_limits() {
        let store = store_at("https://example.supabase.co");
        assert_eq!(
            store.recent_url(),
            "https://example.supabase.co/rest/v1/community_agents?select=*&order=created_at.desc&limit=5"
        );
    }

    #[tokio::test]
    async fn test_list_recent_degrades_to_empty_on_transport_error() {
        // Nothing listens on this port; the read path must swallow the
        // failure and report an empty registry.
        let store = store_at("http://127.0.0.1:1");
        let agents = store.list_recent().await;
        assert!(agents.is_empty());
    }

    #[tokio::test]
    async fn test_save_propagates_transport_error() {
        let store = store_at("http://127.0.0.1:1");

        let mut draft = AgentDraft::new("Sentinel");
        draft.add_skill(Skill::new("Alpha", "pip install alpha")).unwrap();
        let agent = CommunityAgent::from_draft(&draft, "m0nk").unwrap();

        let err = store.save(&agent).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
