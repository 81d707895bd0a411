//! Session error types.

use cdg_core::{EdgeId, NodeId};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Node not found.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge not found.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A node cannot cause itself.
    #[error("cannot link node {0} to itself")]
    SelfLink(NodeId),

    /// Save requested for a diagram that was never saved or opened.
    #[error("no file path set; save with an explicit path")]
    NoPath,

    /// A coordinate or weight that is infinite or NaN.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// Rule index out of range.
    #[error("no forbidden rule at index {index}")]
    RuleIndex { index: usize },

    /// Mutation error.
    #[error("mutation error: {0}")]
    Mutation(#[from] cdg_mutation::MutationError),

    /// Trace error.
    #[error("trace error: {0}")]
    Trace(#[from] cdg_trace::TraceError),

    /// Document error.
    #[error("document error: {0}")]
    Document(#[from] cdg_document::DocumentError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    pub fn rule_index(index: usize) -> Self {
        Self::RuleIndex { index }
    }

    /// Pass `value` through, or fail if it is infinite or NaN.
    pub fn finite(field: &'static str, value: f32) -> SessionResult<f32> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { field })
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
