//! Connector error types.
//!
//! These never cross the read-path API boundary; connectors log them and
//! degrade to sample data. They exist so the fallback decision has a
//! uniform internal shape.

use thiserror::Error;

/// Errors that can occur while talking to an upstream CRM.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Base URL or credentials are not configured
    #[error("connector not configured: {0}")]
    Unconfigured(&'static str),

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Upstream returned a non-success status
    #[error("upstream status {0}")]
    Status(u16),

    /// Authentication failed or was rejected twice in a row
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Payload did not contain a usable record list
    #[error("malformed payload: {0}")]
    Malformed(String),
}
