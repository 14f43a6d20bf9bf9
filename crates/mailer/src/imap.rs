use async_imap::Session;
use async_native_tls::TlsStream;
use async_std::net::TcpStream;
use futures::TryStreamExt;
use mail_parser::MessageParser;
use tracing::{debug, info, instrument};

use crate::{InboxMessage, MailConfig, MailError};

type ImapSession = Session<TlsStream<TcpStream>>;

/// IMAP client for reading replies out of the outreach inbox.
pub struct InboxClient {
    session: ImapSession,
}

impl InboxClient {
    /// Connect and authenticate to the IMAP server via STARTTLS.
    #[instrument(skip(config), fields(host = %config.imap_host, port = config.imap_port))]
    pub async fn connect(config: &MailConfig) -> Result<Self, MailError> {
        let addr = format!("{}:{}", config.imap_host, config.imap_port);
        debug!("Connecting to IMAP server at {}", addr);

        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| MailError::ImapConnection(format!("Failed to connect: {}", e)))?;

        let mut client = async_imap::Client::new(stream);

        let greeting_opt = client.read_response().await;
        let _greeting = greeting_opt
            .ok_or_else(|| MailError::Imap("No greeting from server".to_string()))?
            .map_err(|e| MailError::Imap(format!("IO error reading greeting: {}", e)))?;

        debug!("Received server greeting, initiating STARTTLS");

        client
            .run_command_and_check_ok("STARTTLS", None)
            .await
            .map_err(|e| MailError::Tls(format!("STARTTLS command failed: {}", e)))?;

        let stream = client.into_inner();

        let tls = async_native_tls::TlsConnector::new();
        let tls_stream = tls
            .connect(&config.imap_host, stream)
            .await
            .map_err(|e| MailError::Tls(format!("TLS upgrade failed: {}", e)))?;

        // No greeting is sent after STARTTLS.
        let client = async_imap::Client::new(tls_stream);

        let session = client
            .login(&config.username, config.password())
            .await
            .map_err(|(e, _)| MailError::ImapAuth(format!("Login failed: {}", e)))?;

        info!("Connected to IMAP server via STARTTLS");
        Ok(Self { session })
    }

    /// Fetch the most recent `count` messages from INBOX, newest first.
    #[instrument(skip(self))]
    pub async fn fetch_recent(&mut self, count: u32) -> Result<Vec<InboxMessage>, MailError> {
        let mailbox = self
            .session
            .select("INBOX")
            .await
            .map_err(|e| MailError::Imap(format!("Failed to select INBOX: {}", e)))?;

        let total = mailbox.exists;
        if total == 0 || count == 0 {
            return Ok(Vec::new());
        }

        // Sequence numbers are 1-based and ascending by arrival.
        let first = total.saturating_sub(count - 1).max(1);
        let range = format!("{}:{}", first, total);

        let fetches: Vec<_> = self
            .session
            .fetch(&range, "(UID BODY[])")
            .await
            .map_err(|e| MailError::Imap(format!("Failed to fetch messages: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| MailError::Imap(format!("Failed to collect messages: {}", e)))?;

        let mut messages = Vec::new();
        for fetch in fetches.iter() {
            if let (Some(uid), Some(body)) = (fetch.uid, fetch.body()) {
                match parse_message(uid, body) {
                    Ok(msg) => messages.push(msg),
                    Err(e) => debug!("Failed to parse message {}: {}", uid, e),
                }
            }
        }
        messages.reverse();

        debug!("Fetched {} inbox messages", messages.len());
        Ok(messages)
    }

    /// Logout and close the connection.
    pub async fn logout(mut self) -> Result<(), MailError> {
        self.session
            .logout()
            .await
            .map_err(|e| MailError::Imap(format!("Logout failed: {}", e)))?;
        Ok(())
    }
}

/// Parse raw email bytes into an [`InboxMessage`].
fn parse_message(uid: u32, raw: &[u8]) -> Result<InboxMessage, MailError> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| MailError::ParseMessage("Failed to parse message".to_string()))?;

    let subject = parsed.subject().unwrap_or("(no subject)").to_string();

    let from = parsed
        .from()
        .and_then(|f| f.first())
        .and_then(|a| a.address())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "(unknown)".to_string());

    let body = parsed
        .body_text(0)
        .map(|s| s.to_string())
        .unwrap_or_default();
    let date = parsed.date().map(|d| d.to_rfc822());

    Ok(InboxMessage {
        uid,
        from,
        subject,
        body,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &[u8] = b"From: \"Dana Reyes\" <dana@reyesproperties.example>\r\n\
To: outreach@relo.example\r\n\
Subject: Re: your Austin units\r\n\
Date: Mon, 24 Aug 2026 10:15:00 -0500\r\n\
\r\n\
Sounds good, call me this week.\r\n";

    #[test]
    fn test_parse_message_extracts_envelope_and_body() {
        let msg = parse_message(42, RAW).unwrap();
        assert_eq!(msg.uid, 42);
        assert_eq!(msg.from, "dana@reyesproperties.example");
        assert_eq!(msg.subject, "Re: your Austin units");
        assert!(msg.body.contains("call me this week"));
        assert!(msg.date.is_some());
    }

    #[test]
    fn test_parse_message_defaults_missing_headers() {
        let msg = parse_message(1, b"\r\njust a body\r\n").unwrap();
        assert_eq!(msg.subject, "(no subject)");
        assert_eq!(msg.from, "(unknown)");
    }
}
