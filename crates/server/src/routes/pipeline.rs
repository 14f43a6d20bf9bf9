//! Deal pipeline endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use database::Deal;
use pipeline::{DealPatch, DealWithAge, NewDeal};

use crate::error::Result;
use crate::session::SessionUser;
use crate::state::AppState;

/// GET /api/pipeline
pub async fn list(
    _user: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<DealWithAge>>> {
    let deals = state.pipeline.list_deals().await?;
    Ok(Json(deals))
}

/// POST /api/pipeline
pub async fn create(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(new_deal): Json<NewDeal>,
) -> Result<(StatusCode, Json<Deal>)> {
    let deal = state.pipeline.create_deal(new_deal).await?;
    Ok((StatusCode::CREATED, Json(deal)))
}

#[derive(Debug, Deserialize)]
pub struct PatchRequest {
    id: i64,
    #[serde(flatten)]
    patch: DealPatch,
}

/// PATCH /api/pipeline
pub async fn patch(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<PatchRequest>,
) -> Result<Json<Deal>> {
    let deal = state.pipeline.patch_deal(request.id, request.patch).await?;
    Ok(Json(deal))
}
