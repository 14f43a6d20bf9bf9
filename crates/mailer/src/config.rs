use secrecy::{ExposeSecret, SecretString};
use std::env;

use crate::MailError;

/// Configuration for the SMTP relay and IMAP inbox.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP host (default: 127.0.0.1)
    pub smtp_host: String,
    /// SMTP port (default: 587)
    pub smtp_port: u16,
    /// IMAP host (default: the SMTP host)
    pub imap_host: String,
    /// IMAP port (default: 143)
    pub imap_port: u16,
    /// Mailbox address, used both to authenticate and as the From header
    pub username: String,
    password: SecretString,
}

impl MailConfig {
    /// Create a new configuration with explicit values.
    pub fn new(
        smtp_host: impl Into<String>,
        smtp_port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let host = smtp_host.into();
        Self {
            smtp_host: host.clone(),
            smtp_port,
            imap_host: host,
            imap_port: 143,
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `SMTP_USERNAME` - mailbox address
    /// - `SMTP_PASSWORD` - mailbox password
    ///
    /// Optional (with defaults):
    /// - `SMTP_HOST` - Default: 127.0.0.1
    /// - `SMTP_PORT` - Default: 587
    /// - `IMAP_HOST` - Default: the SMTP host
    /// - `IMAP_PORT` - Default: 143
    pub fn from_env() -> Result<Self, MailError> {
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|e| MailError::Config(format!("Invalid SMTP_PORT: {}", e)))?;

        let imap_host = env::var("IMAP_HOST").unwrap_or_else(|_| smtp_host.clone());

        let imap_port = env::var("IMAP_PORT")
            .unwrap_or_else(|_| "143".to_string())
            .parse::<u16>()
            .map_err(|e| MailError::Config(format!("Invalid IMAP_PORT: {}", e)))?;

        let username =
            env::var("SMTP_USERNAME").map_err(|_| MailError::MissingEnvVar("SMTP_USERNAME".to_string()))?;

        let password =
            env::var("SMTP_PASSWORD").map_err(|_| MailError::MissingEnvVar("SMTP_PASSWORD".to_string()))?;

        Ok(Self {
            smtp_host,
            smtp_port,
            imap_host,
            imap_port,
            username,
            password: SecretString::from(password),
        })
    }

    /// Get the password (exposes the secret).
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Builder method to set the IMAP host.
    pub fn with_imap_host(mut self, host: impl Into<String>) -> Self {
        self.imap_host = host.into();
        self
    }

    /// Builder method to set the IMAP port.
    pub fn with_imap_port(mut self, port: u16) -> Self {
        self.imap_port = port;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_defaults_imap_to_smtp_host() {
        let config = MailConfig::new("mail.relo.example", 587, "outreach@relo.example", "pw");
        assert_eq!(config.imap_host, "mail.relo.example");
        assert_eq!(config.imap_port, 143);
        assert_eq!(config.password(), "pw");
    }

    #[test]
    fn test_builders_override_imap_endpoint() {
        let config = MailConfig::new("mail.relo.example", 587, "outreach@relo.example", "pw")
            .with_imap_host("imap.relo.example")
            .with_imap_port(993);
        assert_eq!(config.imap_host, "imap.relo.example");
        assert_eq!(config.imap_port, 993);
    }
}
