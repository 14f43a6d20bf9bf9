//! Email drafting, sending, log, and inbox endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use classifier::{classify_batch, InboundEmail};
use database::email_log::{self, NewEmailLogEntry};
use database::EmailLogEntry;
use email_engine::{GeneratedEmail, LeadDetails, LeadType};
use mailer::InboxClient;

use crate::error::{ApiError, Result};
use crate::session::SessionUser;
use crate::state::AppState;

const DEFAULT_LOG_LIMIT: i64 = 50;
const DEFAULT_INBOX_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    lead_type: String,
    lead: Value,
    email_number: usize,
}

/// POST /api/email/generate
pub async fn generate(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedEmail>> {
    let lead_type = LeadType::parse(&request.lead_type)
        .ok_or_else(|| ApiError::Validation(format!("unknown lead type: {}", request.lead_type)))?;
    let lead: LeadDetails = serde_json::from_value(request.lead)
        .map_err(|e| ApiError::Validation(format!("bad lead object: {}", e)))?;

    let email = state
        .email_engine
        .generate(lead_type, &lead, request.email_number)
        .await;
    Ok(Json(email))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyRequest {
    original_email: InboundEmail,
}

/// POST /api/email/generate-reply
pub async fn generate_reply(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<GenerateReplyRequest>,
) -> Result<Json<GeneratedEmail>> {
    match state.email_engine.generate_reply(&request.original_email).await {
        Some(reply) => Ok(Json(reply)),
        None => Err(ApiError::Validation(
            "no reply is generated for spam or system messages".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    to: String,
    subject: String,
    body: String,
    lead_id: Option<String>,
    lead_type: Option<String>,
}

/// POST /api/email/send
///
/// Write path: SMTP failures surface as 502 with provider detail, and a
/// failed send logs nothing.
pub async fn send(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<EmailLogEntry>> {
    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("SMTP is not configured".to_string()))?;

    let message_id = mailer
        .send(&request.to, &request.subject, &request.body)
        .await?;

    let entry = NewEmailLogEntry {
        recipient: request.to,
        subject: request.subject,
        body: request.body,
        lead_id: request.lead_id,
        lead_type: request.lead_type,
        message_id: Some(message_id),
    };
    let logged = email_log::append_entry(state.db.pool(), &entry).await?;
    Ok(Json(logged))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    limit: Option<i64>,
}

/// GET /api/email/log
pub async fn log_list(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<EmailLogEntry>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, 500);
    let entries = email_log::list_entries(state.db.pool(), limit).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAppendRequest {
    to: String,
    subject: String,
    body: String,
    lead_id: Option<String>,
    lead_type: Option<String>,
    message_id: Option<String>,
}

/// POST /api/email/log
///
/// Records a send that happened outside the dashboard (e.g. from the
/// operator's own mail client).
pub async fn log_append(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<LogAppendRequest>,
) -> Result<(StatusCode, Json<EmailLogEntry>)> {
    let entry = NewEmailLogEntry {
        recipient: request.to,
        subject: request.subject,
        body: request.body,
        lead_id: request.lead_id,
        lead_type: request.lead_type,
        message_id: request.message_id,
    };
    let logged = email_log::append_entry(state.db.pool(), &entry).await?;
    Ok((StatusCode::CREATED, Json(logged)))
}

#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    limit: Option<u32>,
}

/// GET /api/email/inbox
///
/// Pulls the most recent messages over a fresh IMAP session and attaches a
/// triage verdict to each.
pub async fn inbox(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> Result<Json<Vec<Value>>> {
    let config = state
        .mail_config
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("IMAP is not configured".to_string()))?;

    let limit = query.limit.unwrap_or(DEFAULT_INBOX_LIMIT).clamp(1, 100);

    let mut client = InboxClient::connect(config).await?;
    let messages = client.fetch_recent(limit).await?;
    if let Err(err) = client.logout().await {
        warn!(error = %err, "IMAP logout failed");
    }

    let emails: Vec<InboundEmail> = messages
        .iter()
        .map(|m| InboundEmail {
            from: m.from.clone(),
            subject: m.subject.clone(),
            body: m.body.clone(),
        })
        .collect();
    let verdicts = classify_batch(state.triage.as_deref(), &emails).await;

    let listed = messages
        .iter()
        .zip(verdicts)
        .map(|(message, verdict)| {
            json!({
                "uid": message.uid,
                "from": message.from,
                "subject": message.subject,
                "body": message.body,
                "date": message.date,
                "classification": verdict.classification,
                "priority": verdict.priority,
            })
        })
        .collect();
    Ok(Json(listed))
}
