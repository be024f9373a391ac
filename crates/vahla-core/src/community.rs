//! Community registry trait.
//!
//! The registry is an opaque external collaborator: a collection of shared
//! agent configurations we can list and insert into. Implementations live
//! in `vahla-infra`.

use std::future::Future;

use vahla_types::agent::CommunityAgent;
use vahla_types::error::StoreError;

/// Maximum number of agents returned by `list_recent`.
pub const RECENT_AGENTS_LIMIT: usize = 5;

/// Access to the `community_agents` collection.
///
/// The read and write paths have deliberately asymmetric failure
/// contracts: reads degrade to an empty list on any transport error
/// (callers cannot distinguish "no agents" from "fetch failed"), while
/// write errors always propagate so they cannot fail silently.
pub trait CommunityAgentStore: Send + Sync {
    /// Up to [`RECENT_AGENTS_LIMIT`] agents, newest first.
    ///
    /// Implementations log and swallow transport failures, returning an
    /// empty list.
    fn list_recent(&self) -> impl Future<Output = Vec<CommunityAgent>> + Send;

    /// Insert one validated record.
    fn save(
        &self,
        agent: &CommunityAgent,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
