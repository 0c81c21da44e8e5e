//! Billing handlers

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::WebhookOutcome;
use crate::domain::entities::{Action, SessionUser};
use crate::error::AppError;
use crate::AppState;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub tier_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub received: bool,
    pub handled: bool,
}

/// POST /api/billing/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageBilling).await?;
    let tier_id = req.tier_id.ok_or_else(|| AppError::missing_field("tierId"))?;
    let customer_email = user
        .email
        .as_deref()
        .or(member.profile.email.as_deref());
    let url = state
        .billing
        .checkout(&member, &tier_id, customer_email)
        .await?;
    Ok(Json(CheckoutResponse { url }))
}

/// POST /api/billing/verify
pub async fn verify(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageBilling).await?;
    let session_id = req
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::missing_field("sessionId"))?;
    let active = state.billing.verify(&member, session_id).await?;
    Ok(Json(VerifyResponse {
        success: true,
        active,
    }))
}

/// POST /api/billing/webhook
///
/// Authenticated by signature, not by session.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());
    let outcome = state.billing.handle_webhook(signature, &body).await?;
    Ok(Json(WebhookResponse {
        received: true,
        handled: outcome != WebhookOutcome::Ignored,
    }))
}
