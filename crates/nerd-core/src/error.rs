//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat error types
///
/// Nothing here is fatal: every variant degrades to a visible fallback
/// message in the active session or a silent no-op.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Completion provider error (transport failure or non-success status)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider returned a body the reply could not be read from
    #[error("Malformed provider response: {0}")]
    MalformedReply(String),
}
