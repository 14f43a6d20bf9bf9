//! Application state shared across handlers.

use std::sync::Arc;

use completion_client::CompletionClient;
use connectors::{CricketConnector, GrasshopperConnector};
use database::Database;
use email_engine::EmailEngine;
use mailer::{MailConfig, Mailer};
use pipeline::PipelineEngine;

/// Login credentials and the cookie signing secret.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_secret: String,
    pub users: Vec<(String, String)>,
}

impl AuthConfig {
    /// Check a username/password pair against the configured users.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .iter()
            .any(|(u, p)| u == username && p == password)
    }
}

/// Shared application state.
///
/// The mail and AI members are optional: an unconfigured SMTP relay
/// disables the send path with a 502, an absent AI key leaves every
/// generation and triage call on its deterministic path.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Deal pipeline state machine.
    pub pipeline: PipelineEngine,
    /// Landlord CRM connector.
    pub cricket: Arc<CricketConnector>,
    /// Employer CRM connector.
    pub grasshopper: Arc<GrasshopperConnector>,
    /// Email drafting engine.
    pub email_engine: Arc<EmailEngine>,
    /// Completion client for inbox triage.
    pub triage: Option<Arc<CompletionClient>>,
    /// SMTP sender.
    pub mailer: Option<Arc<Mailer>>,
    /// Mail endpoints, used to open a fresh IMAP session per inbox read.
    pub mail_config: Option<MailConfig>,
    /// Session auth configuration.
    pub auth: Arc<AuthConfig>,
}
