//! Email send log operations. Append-only.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::EmailLogEntry;

/// Field values for a new email log entry.
#[derive(Debug, Clone)]
pub struct NewEmailLogEntry {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub lead_id: Option<String>,
    pub lead_type: Option<String>,
    pub message_id: Option<String>,
}

/// Append an entry to the email log.
pub async fn append_entry(pool: &SqlitePool, entry: &NewEmailLogEntry) -> Result<EmailLogEntry> {
    let id = sqlx::query(
        r#"
        INSERT INTO email_log (recipient, subject, body, lead_id, lead_type, message_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.recipient)
    .bind(&entry.subject)
    .bind(&entry.body)
    .bind(&entry.lead_id)
    .bind(&entry.lead_type)
    .bind(&entry.message_id)
    .execute(pool)
    .await?
    .last_insert_rowid();

    let row = sqlx::query_as::<_, EmailLogEntry>(
        r#"
        SELECT id, recipient, subject, body, lead_id, lead_type, message_id, sent_at
        FROM email_log
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List the most recent log entries, newest first.
pub async fn list_entries(pool: &SqlitePool, limit: i64) -> Result<Vec<EmailLogEntry>> {
    let rows = sqlx::query_as::<_, EmailLogEntry>(
        r#"
        SELECT id, recipient, subject, body, lead_id, lead_type, message_id, sent_at
        FROM email_log
        ORDER BY sent_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
