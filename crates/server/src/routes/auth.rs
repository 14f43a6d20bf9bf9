//! Login, session introspection, and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::session::{clear_cookie, mint_token, session_cookie, SessionUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    if !state.auth.verify(&request.username, &request.password) {
        return Err(ApiError::Auth("invalid credentials".to_string()));
    }

    let token = mint_token(&request.username, &state.auth.session_secret);
    info!(username = %request.username, "dashboard login");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "username": request.username })),
    ))
}

/// GET /api/auth/me
pub async fn me(SessionUser(username): SessionUser) -> Json<serde_json::Value> {
    Json(json!({ "username": username }))
}

/// POST /api/auth/logout
pub async fn logout(SessionUser(username): SessionUser) -> impl IntoResponse {
    info!(username = %username, "dashboard logout");
    (
        AppendHeaders([(SET_COOKIE, clear_cookie())]),
        Json(json!({ "ok": true })),
    )
}
