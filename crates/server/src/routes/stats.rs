//! Aggregated reporting endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use database::{activity, stats};

use crate::error::{ApiError, Result};
use crate::session::SessionUser;
use crate::state::AppState;

const TOP_SUBJECT_LIMIT: i64 = 5;
const RECENT_ACTIVITY_LIMIT: i64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    range: Option<String>,
}

fn window_days(range: Option<&str>) -> Result<i64> {
    match range.unwrap_or("30d") {
        "7d" => Ok(7),
        "30d" => Ok(30),
        "90d" => Ok(90),
        other => Err(ApiError::Validation(format!(
            "range must be 7d, 30d, or 90d, got {}",
            other
        ))),
    }
}

/// GET /api/stats
///
/// Everything is recomputed per call; there is no caching layer to
/// invalidate.
pub async fn report(
    _user: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Value>> {
    let days = window_days(query.range.as_deref())?;
    let pool = state.db.pool();

    let total_sends = stats::count_sends(pool, days).await?;
    let previous_period_sends = stats::count_previous_period_sends(pool, days).await?;
    let sends_by_lead_type: Vec<Value> = stats::sends_by_lead_type(pool, days)
        .await?
        .into_iter()
        .map(|(lead_type, sends)| json!({ "leadType": lead_type, "sends": sends }))
        .collect();
    let deals_by_stage: Vec<Value> = stats::deals_by_stage(pool)
        .await?
        .into_iter()
        .map(|(stage, deals, total_value)| {
            json!({ "stage": stage, "deals": deals, "totalValue": total_value })
        })
        .collect();
    let daily_sends: Vec<Value> = stats::daily_send_counts(pool, days)
        .await?
        .into_iter()
        .map(|(day, sends)| json!({ "day": day, "sends": sends }))
        .collect();
    let top_subjects: Vec<Value> = stats::top_subjects(pool, days, TOP_SUBJECT_LIMIT)
        .await?
        .into_iter()
        .map(|(subject, uses)| json!({ "subject": subject, "uses": uses }))
        .collect();
    let recent_activities: Vec<Value> = activity::recent_activities(pool, RECENT_ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|(activity, deal_name)| {
            json!({
                "dealId": activity.deal_id,
                "dealName": deal_name,
                "activityType": activity.activity_type,
                "description": activity.description,
                "createdAt": activity.created_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "rangeDays": days,
        "totalSends": total_sends,
        "previousPeriodSends": previous_period_sends,
        "sendsByLeadType": sends_by_lead_type,
        "dealsByStage": deals_by_stage,
        "dailySends": daily_sends,
        "topSubjects": top_subjects,
        "recentActivities": recent_activities,
    })))
}
