//! SMTP sending and IMAP inbox access.
//!
//! The write path (sending) surfaces every failure with provider detail;
//! the read path (inbox) is polled per request with a fresh connection.

mod config;
mod error;
mod imap;
mod smtp;

pub use config::MailConfig;
pub use error::MailError;
pub use imap::InboxClient;
pub use smtp::Mailer;

use serde::Serialize;

/// One message pulled from the outreach inbox.
#[derive(Debug, Clone, Serialize)]
pub struct InboxMessage {
    pub uid: u32,
    pub from: String,
    pub subject: String,
    pub body: String,
    /// RFC 822 date string, when the message carried one.
    pub date: Option<String>,
}
