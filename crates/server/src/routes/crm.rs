//! Lead listing endpoints, one per source.
//!
//! These are read-path: connector failures degrade to sample data inside
//! the connectors, so the handlers themselves are infallible.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use connectors::{university_contacts, LeadFilters, LeadPage, UniversityFilters};

use crate::session::SessionUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordQuery {
    city: Option<String>,
    status: Option<String>,
    min_properties: Option<i64>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// GET /api/crm/landlords
pub async fn landlords(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<LandlordQuery>,
) -> Json<LeadPage> {
    let filters = LeadFilters {
        status: query.status,
        min_metric: query.min_properties,
        region: query.city,
        limit: query.limit.unwrap_or(0),
        offset: query.offset.unwrap_or(0),
    };
    Json(state.cricket.fetch_leads(&filters).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerQuery {
    industry: Option<String>,
    status: Option<String>,
    min_relocations: Option<i64>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// GET /api/crm/employers
pub async fn employers(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<EmployerQuery>,
) -> Json<LeadPage> {
    let filters = LeadFilters {
        status: query.status,
        min_metric: query.min_relocations,
        region: query.industry,
        limit: query.limit.unwrap_or(0),
        offset: query.offset.unwrap_or(0),
    };
    Json(state.grasshopper.fetch_leads(&filters).await)
}

#[derive(Debug, Default, Deserialize)]
pub struct UniversityQuery {
    tier: Option<String>,
    state: Option<String>,
    #[serde(rename = "type")]
    partnership_type: Option<String>,
}

/// GET /api/crm/universities
pub async fn universities(
    _user: SessionUser,
    Query(query): Query<UniversityQuery>,
) -> Json<Value> {
    let filters = UniversityFilters {
        tier: query.tier,
        state: query.state,
        partnership_type: query.partnership_type,
    };
    let contacts = university_contacts(&filters);
    let total = contacts.len();
    Json(json!({
        "contacts": contacts,
        "total": total,
        "source": connectors::SOURCE_PLAYBOOK,
    }))
}
