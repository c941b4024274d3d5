use thiserror::Error;

use crate::service::chain_gateway::GatewayError;

/// Errors surfaced at the orchestrator/sync boundary. Remote errors are
/// wrapped here so callers always receive a single displayable message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A local precondition failed. No network call was made; recoverable by
    /// correcting the input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Another write is already in flight. Not queued: wait and retry.
    #[error("another transaction is already in flight")]
    Busy,

    /// One or more id lookups failed during a refresh. The previous snapshot
    /// stays published.
    #[error("entity resolution failed: {0}")]
    Resolution(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    pub fn resolution(msg: impl Into<String>) -> Self {
        ClientError::Resolution(msg.into())
    }
}
