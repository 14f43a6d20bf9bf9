//! Static university partnership playbook.
//!
//! University contacts are not pulled from any CRM; the partnerships team
//! maintains a short curated list that ships with the binary. The list is
//! filtered in memory and always tagged `source = "playbook"`.

use serde::{Deserialize, Serialize};

use crate::lead::{Lead, LeadStatus};
use crate::SOURCE_PLAYBOOK;

/// A university relocation-office contact from the playbook.
///
/// Flattens the canonical lead fields and adds the two playbook-specific
/// dimensions. `metric` carries annual incoming student volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityContact {
    #[serde(flatten)]
    pub lead: Lead,
    /// Partnership tier: "flagship", "core", or "emerging".
    pub tier: String,
    /// Engagement model: "housing_guarantee", "referral", or "pilot".
    pub partnership_type: String,
}

/// In-memory filters for the playbook list.
#[derive(Debug, Clone, Default)]
pub struct UniversityFilters {
    pub tier: Option<String>,
    pub state: Option<String>,
    pub partnership_type: Option<String>,
}

fn contact(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    city: &str,
    state: &str,
    students: i64,
    score: i64,
    status: LeadStatus,
    tier: &str,
    partnership_type: &str,
) -> UniversityContact {
    UniversityContact {
        lead: Lead {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            metric: students,
            score,
            status,
            source: SOURCE_PLAYBOOK.to_string(),
        },
        tier: tier.to_string(),
        partnership_type: partnership_type.to_string(),
    }
}

fn playbook() -> Vec<UniversityContact> {
    vec![
        contact("uni-1", "UT Austin Housing Office", "offcampus@utexas.example", "512-555-0201", "Austin", "TX", 4200, 90, LeadStatus::Qualified, "flagship", "housing_guarantee"),
        contact("uni-2", "Vanderbilt Student Life", "housing@vanderbilt.example", "615-555-0212", "Nashville", "TN", 1800, 76, LeadStatus::Contacted, "core", "referral"),
        contact("uni-3", "DePaul Off-Campus Services", "livingoffcampus@depaul.example", "312-555-0223", "Chicago", "IL", 2600, 81, LeadStatus::New, "core", "referral"),
        contact("uni-4", "CU Denver Residence Life", "reslife@ucdenver.example", "303-555-0234", "Denver", "CO", 1500, 64, LeadStatus::New, "emerging", "pilot"),
        contact("uni-5", "Georgia Tech Housing", "housing@gatech.example", "404-555-0245", "Atlanta", "GA", 3900, 88, LeadStatus::Responded, "flagship", "housing_guarantee"),
        contact("uni-6", "ASU Off-Campus Housing", "offcampus@asu.example", "602-555-0256", "Phoenix", "AZ", 5100, 93, LeadStatus::Qualified, "flagship", "housing_guarantee"),
        contact("uni-7", "Seattle U Commuter Services", "commuter@seattleu.example", "206-555-0267", "Seattle", "WA", 900, 55, LeadStatus::New, "emerging", "pilot"),
        contact("uni-8", "NC State Student Housing", "housing@ncsu.example", "919-555-0278", "Raleigh", "NC", 2200, 72, LeadStatus::Contacted, "core", "referral"),
    ]
}

/// The playbook list, filtered in memory. Filter values match
/// case-insensitively; a `None` filter passes everything.
pub fn university_contacts(filters: &UniversityFilters) -> Vec<UniversityContact> {
    playbook()
        .into_iter()
        .filter(|c| matches_opt(&filters.tier, &c.tier))
        .filter(|c| matches_opt(&filters.state, &c.lead.state))
        .filter(|c| matches_opt(&filters.partnership_type, &c.partnership_type))
        .collect()
}

fn matches_opt(filter: &Option<String>, value: &str) -> bool {
    match filter {
        Some(wanted) => wanted.eq_ignore_ascii_case(value),
        None => true,
    }
}
