//! The canonical stage sequence.

use serde::{Deserialize, Serialize};

/// Pipeline stage. The order below is the canonical progression, with
/// `closed` terminal, but patches may move a deal to any member of the
/// set; sales work goes backward often enough that the store does not
/// police direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lead,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Lead,
        Stage::Contacted,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Closed,
    ];

    /// Parse a stage name. Unknown strings are rejected at the mutation
    /// boundary, never coerced.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lead" => Some(Stage::Lead),
            "contacted" => Some(Stage::Contacted),
            "qualified" => Some(Stage::Qualified),
            "proposal" => Some(Stage::Proposal),
            "negotiation" => Some(Stage::Negotiation),
            "closed" => Some(Stage::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Lead => "lead",
            Stage::Contacted => "contacted",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::Closed => "closed",
        }
    }
}
