//! Lead context for drafting.

use serde::Deserialize;

/// Which outreach audience a lead belongs to. Each type has its own
/// five-step sequence and its own drafting persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadType {
    Landlord,
    Employer,
    University,
}

impl LeadType {
    /// Parse the wire value. Unknown types are rejected at the API
    /// boundary, not defaulted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "landlord" => Some(LeadType::Landlord),
            "employer" => Some(LeadType::Employer),
            "university" => Some(LeadType::University),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadType::Landlord => "landlord",
            LeadType::Employer => "employer",
            LeadType::University => "university",
        }
    }
}

/// The slice of a lead that drafting cares about.
///
/// Callers post whatever lead object they have on hand, so every field is
/// optional on the wire and defaults to empty. The accessors below supply
/// usable fallbacks, which is what keeps the template stage infallible.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadDetails {
    pub name: String,
    pub company: String,
    pub email: String,
    pub city: String,
    pub state: String,
    /// Type-specific volume: units, annual relocations, or enrollment.
    pub metric: i64,
    pub score: i64,
}

impl LeadDetails {
    /// First name for the greeting, falling back to "there".
    pub fn greeting_name(&self) -> String {
        self.name
            .split_whitespace()
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("there")
            .to_string()
    }

    /// Organization display name, falling back through the contact name.
    pub fn org_name(&self) -> String {
        if !self.company.trim().is_empty() {
            self.company.trim().to_string()
        } else if !self.name.trim().is_empty() {
            self.name.trim().to_string()
        } else {
            "your team".to_string()
        }
    }

    /// City with a generic fallback.
    pub fn city_name(&self) -> String {
        if self.city.trim().is_empty() {
            "your market".to_string()
        } else {
            self.city.trim().to_string()
        }
    }

    /// Volume metric, shown as at least 1 so copy never reads "0 units".
    pub fn volume(&self) -> i64 {
        self.metric.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_type_parses_known_values_only() {
        assert_eq!(LeadType::parse("Landlord"), Some(LeadType::Landlord));
        assert_eq!(LeadType::parse("employer"), Some(LeadType::Employer));
        assert_eq!(LeadType::parse("startup"), None);
    }

    #[test]
    fn test_details_deserialize_from_partial_object() {
        let details: LeadDetails =
            serde_json::from_value(serde_json::json!({"name": "Dana Reyes"})).unwrap();
        assert_eq!(details.name, "Dana Reyes");
        assert_eq!(details.greeting_name(), "Dana");
        assert_eq!(details.org_name(), "Dana Reyes");
        assert_eq!(details.city_name(), "your market");
        assert_eq!(details.volume(), 1);
    }

    #[test]
    fn test_empty_details_still_produce_usable_fallbacks() {
        let details = LeadDetails::default();
        assert_eq!(details.greeting_name(), "there");
        assert_eq!(details.org_name(), "your team");
    }
}
