//! Normalization of heterogeneous upstream records into the canonical
//! [`Lead`] shape.
//!
//! Both CRMs have drifted field names over time, so every logical field is
//! read through an ordered alias list. Missing numerics default to 0,
//! missing strings to "", and status enumerations are lowercased.

use serde_json::Value;

use crate::lead::{Lead, LeadStatus};

/// Read the first present, non-empty string among `aliases`.
/// Numeric values stringify; anything else defaults to "".
fn str_field(record: &Value, aliases: &[&str]) -> String {
    for alias in aliases {
        match record.get(alias) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// Read the first present numeric value among `aliases`, accepting numeric
/// strings. Defaults to 0.
fn num_field(record: &Value, aliases: &[&str]) -> i64 {
    for alias in aliases {
        match record.get(alias) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    return v;
                }
                if let Some(v) = n.as_f64() {
                    return v as i64;
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<i64>() {
                    return v;
                }
            }
            _ => {}
        }
    }
    0
}

/// Map one cricket landlord record into a canonical lead.
pub(crate) fn landlord_lead(record: &Value, source: &str) -> Lead {
    Lead {
        id: str_field(record, &["id", "landlord_id", "owner_id"]),
        name: str_field(record, &["owner_name", "full_name", "name", "contact_name"]),
        email: str_field(record, &["email_address", "email", "contact_email"]),
        phone: str_field(record, &["phone_number", "phone", "mobile"]),
        city: str_field(record, &["city", "market_city", "market"]),
        state: str_field(record, &["state", "region", "market_state"]),
        metric: num_field(record, &["units", "property_count", "properties", "unit_count"]),
        score: num_field(record, &["lead_score", "score", "rating"]),
        status: LeadStatus::parse_lossy(&str_field(
            record,
            &["property_status", "status", "stage"],
        )),
        source: source.to_string(),
    }
}

/// Map one grasshopper employer record into a canonical lead.
///
/// Employer industry only exists upstream as a filter dimension; it is not
/// part of the canonical shape.
pub(crate) fn employer_lead(record: &Value, source: &str) -> Lead {
    Lead {
        id: str_field(record, &["id", "employer_id", "company_id"]),
        name: str_field(record, &["company_name", "employer_name", "name"]),
        email: str_field(record, &["hr_email", "contact_email", "email"]),
        phone: str_field(record, &["phone", "contact_phone", "phone_number"]),
        city: str_field(record, &["city", "hq_city", "headquarters_city"]),
        state: str_field(record, &["state", "hq_state", "headquarters_state"]),
        metric: num_field(
            record,
            &[
                "annual_relocations",
                "relocation_count",
                "relocations",
                "moves_per_year",
            ],
        ),
        score: num_field(record, &["lead_score", "score"]),
        status: LeadStatus::parse_lossy(&str_field(record, &["hiring_status", "status"])),
        source: source.to_string(),
    }
}

/// Locate the record array inside an upstream payload, tolerating the
/// envelope key drifting between API versions.
pub(crate) fn record_array<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    for key in keys {
        if let Some(Value::Array(items)) = payload.get(key) {
            return Some(items);
        }
    }
    // Some endpoints return a bare array.
    payload.as_array()
}
