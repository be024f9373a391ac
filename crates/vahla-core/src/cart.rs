//! Cart draft persistence trait.
//!
//! Defines `CartStore` for saving and restoring the agent draft between
//! CLI invocations. The deploy flow checks for a saved draft on startup
//! ("is the cart hydrated"); a missing draft is the empty-cart case, not
//! an error.

use std::future::Future;

use vahla_types::agent::AgentDraft;
use vahla_types::error::RepositoryError;

/// Persistence interface for the agent draft.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project. There is a single draft per
/// installation; save is an upsert.
pub trait CartStore: Send + Sync {
    /// Load the saved draft, if any.
    fn load(&self) -> impl Future<Output = Result<Option<AgentDraft>, RepositoryError>> + Send;

    /// Save or replace the draft.
    fn save(
        &self,
        draft: &AgentDraft,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the saved draft. No-op if none exists.
    fn clear(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
