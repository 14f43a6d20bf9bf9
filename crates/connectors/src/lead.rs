//! Canonical lead shape shared by every connector.

use serde::{Deserialize, Serialize};

/// Outreach status of a lead, as reported by the upstream system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Responded,
    Qualified,
    Closed,
    Lost,
}

impl LeadStatus {
    /// Parse an upstream status string, tolerating casing. Unknown values
    /// map to `New` rather than failing the record.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "contacted" => LeadStatus::Contacted,
            "responded" | "replied" => LeadStatus::Responded,
            "qualified" => LeadStatus::Qualified,
            "closed" | "won" => LeadStatus::Closed,
            "lost" | "dead" => LeadStatus::Lost,
            _ => LeadStatus::New,
        }
    }

    /// Canonical lowercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Responded => "responded",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Closed => "closed",
            LeadStatus::Lost => "lost",
        }
    }
}

/// A prospective contact sourced from an external system.
///
/// Leads are ephemeral: they are re-fetched on every request and never
/// persisted locally. `metric` is type-specific (property count for
/// landlords, relocation volume for employers, enrollment for
/// universities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Upstream identifier.
    pub id: String,
    /// Display name (person or company).
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// City.
    pub city: String,
    /// State / region code.
    pub state: String,
    /// Type-specific volume metric.
    pub metric: i64,
    /// Upstream-supplied score, 0-100.
    pub score: i64,
    /// Outreach status.
    pub status: LeadStatus,
    /// Provenance tag: "cricket", "grasshopper", "sample", or "playbook".
    pub source: String,
}

/// Filters accepted by every connector, translated into each source's own
/// query vocabulary.
#[derive(Debug, Clone, Default)]
pub struct LeadFilters {
    /// Status filter (canonical lowercase value).
    pub status: Option<String>,
    /// Minimum type-specific metric.
    pub min_metric: Option<i64>,
    /// City / market / industry region filter, source-dependent.
    pub region: Option<String>,
    /// Page size. Zero means the connector default.
    pub limit: i64,
    /// Page offset.
    pub offset: i64,
}

impl LeadFilters {
    /// Page size falling back to the connector default of 50.
    pub fn limit_or_default(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            50
        }
    }
}

/// One page of leads plus provenance for the whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    pub total: i64,
    pub source: String,
}
