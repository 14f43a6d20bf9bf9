use thiserror::Error;

/// Errors from the send and inbox paths.
#[derive(Debug, Error)]
pub enum MailError {
    /// Failed to build SMTP transport
    #[error("SMTP transport error: {0}")]
    Transport(String),

    /// Failed to send email
    #[error("Failed to send email: {0}")]
    Send(String),

    /// Failed to build email message
    #[error("Failed to build email: {0}")]
    BuildMessage(String),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Failed to reach the IMAP server
    #[error("IMAP connection error: {0}")]
    ImapConnection(String),

    /// IMAP authentication failed
    #[error("IMAP auth error: {0}")]
    ImapAuth(String),

    /// TLS negotiation failed
    #[error("TLS error: {0}")]
    Tls(String),

    /// IMAP protocol error
    #[error("IMAP error: {0}")]
    Imap(String),

    /// Failed to parse a fetched message
    #[error("Failed to parse message: {0}")]
    ParseMessage(String),
}
