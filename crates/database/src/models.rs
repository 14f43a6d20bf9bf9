//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sales opportunity tracked through the pipeline stage sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Deal {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Contact or display name.
    pub name: String,
    /// Company, if known.
    pub company: Option<String>,
    /// Deal type: "landlord" or "employer".
    #[serde(rename = "type")]
    pub deal_type: String,
    /// Current pipeline stage.
    pub stage: String,
    /// Monetary value.
    pub value: f64,
    /// Win probability 0-100 (advisory, not derived from stage).
    pub probability: i64,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Next planned action.
    pub next_action: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// An immutable audit entry attached to a deal.
///
/// Activities are append-only: written once on deal creation or stage
/// change, never updated or deleted independently. Deleting the owning
/// deal cascades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning deal.
    pub deal_id: i64,
    /// Activity type: "created", "stage_change", ...
    pub activity_type: String,
    /// Human-readable description.
    pub description: String,
    /// Structured metadata as JSON text (e.g. {"from": ..., "to": ...}).
    pub metadata: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// A logged outbound email. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmailLogEntry {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Upstream lead ID, if the send was lead-driven.
    pub lead_id: Option<String>,
    /// Lead type: "landlord", "employer", or "university".
    pub lead_type: Option<String>,
    /// Provider message ID, if returned.
    pub message_id: Option<String>,
    /// Send timestamp.
    pub sent_at: String,
}

/// A flat string key/value setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Setting {
    /// Setting key. Keys prefixed with `_` are reserved for runtime status.
    pub key: String,
    /// Setting value.
    pub value: String,
    /// Last update timestamp.
    pub updated_at: String,
}
