//! Error types for the Kairan CLI client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Session ID is already in use
    #[error("Session ID '{0}' is already connected")]
    DuplicateSession(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
