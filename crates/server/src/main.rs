//! HTTP API server for the Relo outreach dashboard.
//!
//! JSON API only; the dashboard UI is an external collaborator. Optional
//! integrations (AI drafting, SMTP, IMAP) degrade individually when
//! unconfigured instead of blocking startup.

mod config;
mod error;
mod routes;
mod session;
mod state;

use std::sync::Arc;

use completion_client::{CompletionClient, CompletionConfig};
use connectors::{CricketConnector, GrasshopperConnector};
use database::Database;
use email_engine::EmailEngine;
use mailer::{MailConfig, Mailer};
use pipeline::PipelineEngine;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::{AppState, AuthConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting dashboard server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Lead source connectors (unconfigured ones serve sample data)
    let cricket = Arc::new(CricketConnector::from_env());
    let grasshopper = Arc::new(GrasshopperConnector::from_env());

    // Two clients off the same AI config: one owned by the drafting
    // engine, one shared with inbox triage.
    let ai_config = CompletionConfig::from_env().ok();
    let drafting = ai_config
        .clone()
        .and_then(|c| CompletionClient::new(c).ok());
    let triage = ai_config
        .and_then(|c| CompletionClient::new(c).ok())
        .map(Arc::new);
    if drafting.is_none() {
        info!("AI_API_KEY not set, drafting and triage run on deterministic paths");
    }

    // Mail is optional; without it the send path answers 502.
    let mail_config = match MailConfig::from_env() {
        Ok(c) => Some(c),
        Err(err) => {
            warn!(error = %err, "mail disabled");
            None
        }
    };
    let mailer = match &mail_config {
        Some(c) => match Mailer::new(c) {
            Ok(m) => Some(Arc::new(m)),
            Err(err) => {
                warn!(error = %err, "SMTP disabled");
                None
            }
        },
        None => None,
    };

    // Build application state
    let state = AppState {
        pipeline: PipelineEngine::new(db.clone()),
        db,
        cricket,
        grasshopper,
        email_engine: Arc::new(EmailEngine::new(drafting)),
        triage,
        mailer,
        mail_config,
        auth: Arc::new(AuthConfig {
            session_secret: config.session_secret,
            users: config.users,
        }),
    };

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Dashboard server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
