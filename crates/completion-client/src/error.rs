//! Completion client error types.

use thiserror::Error;

/// Errors that can occur when calling the completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Client construction or missing configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure (connect, timeout, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Provider returned a non-success status or an unusable payload
    #[error("provider error: {0}")]
    Provider(String),
}
