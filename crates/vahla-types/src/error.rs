use thiserror::Error;

/// Errors related to cart (agent draft) operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("skill '{0}' is already in the cart")]
    DuplicateSkill(String),

    #[error("skill '{0}' is not in the cart")]
    SkillNotFound(String),

    #[error("the cart is empty")]
    EmptyCart,

    #[error("no agent name set")]
    MissingAgentName,
}

/// Errors related to the deployment flow.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Nothing to deploy: starting a run requires a non-empty cart.
    #[error("cannot deploy an empty cart")]
    EmptyCart,
}

/// Errors from the community registry store.
///
/// Only `Config` is fatal; transport errors on the read path are degraded
/// to empty results by the store, while write-path errors propagate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registry not configured: {0}")]
    Config(String),

    #[error("registry transport error: {0}")]
    Transport(String),

    #[error("registry rejected the record: {0}")]
    Rejected(String),
}

/// Errors from local persistence (used by trait definitions in vahla-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::DuplicateSkill("web-search".to_string());
        assert_eq!(err.to_string(), "skill 'web-search' is already in the cart");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Config("VAHLA_STORE_URL is not set".to_string());
        assert!(err.to_string().contains("VAHLA_STORE_URL"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
