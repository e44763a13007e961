//! Tool failures.
//!
//! A tool never fails the JSON-RPC request. Its error is rendered into the
//! result text and flagged with `isError`.

use thiserror::Error;

/// Text produced by a tool, or the reason it could not produce one.
pub type ToolResult = std::result::Result<String, ToolError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The session could not be established.
    #[error("{context}: {message}")]
    Auth { context: String, message: String },

    /// Missing or malformed arguments. Nothing was sent to Salesforce.
    #[error("Error: {0}")]
    Validation(String),

    /// The named object, field, user or log does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A user lookup matched more than one user.
    #[error("{0}")]
    Ambiguous(String),

    /// Salesforce rejected the call or the transport failed.
    #[error("{context}: {message}")]
    Remote { context: String, message: String },
}

impl ToolError {
    pub fn auth(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Auth {
            context: context.into(),
            message: err.to_string(),
        }
    }

    pub fn remote(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Remote {
            context: context.into(),
            message: err.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
