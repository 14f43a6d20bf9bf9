use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message,
    Tokio1Executor,
};
use tracing::{info, instrument};

use crate::{MailConfig, MailError};

static MESSAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Client for sending outreach mail over an SMTP relay.
///
/// Uses connection pooling for efficient batch sending.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    ///
    /// Establishes a pooled STARTTLS connection to the relay.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let creds = Credentials::new(config.username.clone(), config.password().to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            username = %config.username,
            "Created SMTP mailer"
        );

        Ok(Self {
            transport,
            from_address: config.username.clone(),
        })
    }

    /// Send a plain-text email. Returns the message id stamped on the mail.
    #[instrument(skip(self, body), fields(to = %to, subject = %subject))]
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailError> {
        let from = self
            .from_address
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("From: {}", e)))?;
        let to_addr = to
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("To '{}': {}", to, e)))?;

        let message_id = next_message_id(&self.from_address);
        let message = Message::builder()
            .from(from)
            .to(to_addr)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .body(body.to_string())
            .map_err(|e| MailError::BuildMessage(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        info!(to = %to, message_id = %message_id, "Email sent successfully");
        Ok(message_id)
    }
}

/// Mint a unique RFC 5322 message id under the sender's domain.
fn next_message_id(from_address: &str) -> String {
    let domain = from_address.split('@').nth(1).unwrap_or("relo.invalid");
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = MESSAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("<{}.{}@{}>", nanos, seq, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique_and_domain_scoped() {
        let a = next_message_id("outreach@relo.example");
        let b = next_message_id("outreach@relo.example");
        assert_ne!(a, b);
        assert!(a.starts_with('<'));
        assert!(a.ends_with("@relo.example>"));
    }

    #[test]
    fn test_message_id_survives_malformed_sender() {
        let id = next_message_id("not-an-address");
        assert!(id.ends_with("@relo.invalid>"));
    }
}
