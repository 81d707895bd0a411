//! Trace error types.

use cdg_core::NodeId;
use thiserror::Error;

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("Trace target not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid trace bounds: {message}")]
    InvalidBounds { message: String },
}

impl TraceError {
    pub fn invalid_bounds(message: impl Into<String>) -> Self {
        Self::InvalidBounds {
            message: message.into(),
        }
    }
}
