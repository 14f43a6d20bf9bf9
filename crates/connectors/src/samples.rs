//! Hardcoded fallback datasets.
//!
//! Served verbatim whenever an upstream CRM is unreachable, unconfigured,
//! or returns nothing usable. Always tagged `source = "sample"` so the UI
//! can tell the operator they are not looking at live data.

use crate::lead::{Lead, LeadStatus};
use crate::SOURCE_SAMPLE;

fn lead(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    city: &str,
    state: &str,
    metric: i64,
    score: i64,
    status: LeadStatus,
) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        metric,
        score,
        status,
        source: SOURCE_SAMPLE.to_string(),
    }
}

/// Eight representative landlord records.
pub fn sample_landlords() -> Vec<Lead> {
    vec![
        lead("s-ll-1", "Dana Reyes", "dana@reyesproperties.example", "512-555-0144", "Austin", "TX", 34, 82, LeadStatus::New),
        lead("s-ll-2", "Marcus Oliveira", "marcus@oakridgerentals.example", "615-555-0187", "Nashville", "TN", 12, 67, LeadStatus::Contacted),
        lead("s-ll-3", "Priya Natarajan", "priya@lakeviewunits.example", "312-555-0109", "Chicago", "IL", 58, 91, LeadStatus::New),
        lead("s-ll-4", "Tom Keller", "tkeller@kellerhomes.example", "720-555-0132", "Denver", "CO", 8, 44, LeadStatus::Responded),
        lead("s-ll-5", "Alicia Fontaine", "alicia@fontainegrp.example", "404-555-0171", "Atlanta", "GA", 26, 73, LeadStatus::New),
        lead("s-ll-6", "Greg Sandoval", "greg@sunbeltflats.example", "602-555-0118", "Phoenix", "AZ", 41, 79, LeadStatus::Qualified),
        lead("s-ll-7", "Helen Cho", "helen@chorentals.example", "206-555-0156", "Seattle", "WA", 17, 61, LeadStatus::Contacted),
        lead("s-ll-8", "Victor Adeyemi", "victor@crestviewprops.example", "919-555-0193", "Raleigh", "NC", 22, 70, LeadStatus::New),
    ]
}

/// Eight representative employer records.
pub fn sample_employers() -> Vec<Lead> {
    vec![
        lead("s-em-1", "Northwind Logistics", "talent@northwind.example", "303-555-0102", "Denver", "CO", 120, 85, LeadStatus::New),
        lead("s-em-2", "Beacon Health Systems", "recruiting@beaconhealth.example", "617-555-0149", "Boston", "MA", 75, 78, LeadStatus::Contacted),
        lead("s-em-3", "Solara Energy", "people@solara.example", "713-555-0125", "Houston", "TX", 210, 92, LeadStatus::New),
        lead("s-em-4", "Cobalt Software", "hr@cobaltsw.example", "415-555-0163", "San Francisco", "CA", 45, 66, LeadStatus::Responded),
        lead("s-em-5", "Harvest Foods Group", "careers@harvestfoods.example", "515-555-0177", "Des Moines", "IA", 30, 52, LeadStatus::New),
        lead("s-em-6", "Meridian Financial", "talent@meridianfin.example", "704-555-0138", "Charlotte", "NC", 95, 81, LeadStatus::Qualified),
        lead("s-em-7", "Atlas Aerospace", "staffing@atlasaero.example", "316-555-0111", "Wichita", "KS", 160, 88, LeadStatus::New),
        lead("s-em-8", "Juniper Hospitality", "jobs@juniperhosp.example", "702-555-0184", "Las Vegas", "NV", 55, 59, LeadStatus::Contacted),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sets_have_eight_records_tagged_sample() {
        let landlords = sample_landlords();
        let employers = sample_employers();
        assert_eq!(landlords.len(), 8);
        assert_eq!(employers.len(), 8);
        assert!(landlords.iter().all(|l| l.source == "sample"));
        assert!(employers.iter().all(|l| l.source == "sample"));
    }
}
