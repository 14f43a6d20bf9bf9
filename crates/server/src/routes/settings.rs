//! Settings endpoints.
//!
//! The GET view merges persisted settings with `_`-prefixed runtime status
//! flags computed from the live state. Those flags are read-only; the
//! store rejects writes to them before touching any row.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use database::settings;

use crate::error::Result;
use crate::session::SessionUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn list(_user: SessionUser, State(state): State<AppState>) -> Result<Json<Value>> {
    let mut view = Map::new();
    for setting in settings::list_settings(state.db.pool()).await? {
        view.insert(setting.key, Value::String(setting.value));
    }

    view.insert("_ai_configured".to_string(), json!(state.email_engine.has_ai()));
    view.insert("_smtp_configured".to_string(), json!(state.mailer.is_some()));
    view.insert("_imap_configured".to_string(), json!(state.mail_config.is_some()));

    Ok(Json(Value::Object(view)))
}

#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    key: String,
    value: String,
}

/// POST /api/settings
pub async fn upsert(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<UpsertRequest>,
) -> Result<Json<Value>> {
    settings::upsert_setting(state.db.pool(), &request.key, &request.value).await?;
    Ok(Json(json!({ "key": request.key, "value": request.value })))
}
