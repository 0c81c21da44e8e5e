//! Subscription gate and tier handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use super::PUBLIC_CACHE_CONTROL;
use crate::app::GateView;
use crate::domain::entities::SessionUser;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GateQuery {
    #[serde(default = "default_route")]
    pub route: String,
}

fn default_route() -> String {
    "/dashboard".to_string()
}

/// GET /api/subscription/gate?route=/jobs
pub async fn get_gate(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<GateQuery>,
) -> Result<Json<GateView>, AppError> {
    Ok(Json(state.subscriptions.gate(&user, &query.route).await?))
}

/// GET /api/subscription-tiers
pub async fn list_tiers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tiers = state.subscriptions.list_tiers().await?;
    Ok(([(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)], Json(tiers)))
}
