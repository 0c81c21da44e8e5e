//! Calendar integration handlers

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{parse_provider, CallbackParams, SaveCredentialRequest};
use crate::domain::entities::{
    Action, CalendarConnection, IntegrationCredential, SessionUser,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    #[serde(alias = "redirectTo")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub success: bool,
    pub credential: IntegrationCredential,
}

#[derive(Debug, Serialize)]
pub struct DisconnectResponse {
    pub success: bool,
}

/// GET /api/integrations/credentials
///
/// Client secrets are never part of the response.
pub async fn list_credentials(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Vec<IntegrationCredential>>, AppError> {
    let member = state.access.require(&user, Action::ManageIntegrations).await?;
    Ok(Json(
        state
            .integrations
            .list_credentials(&member.organization_id)
            .await?,
    ))
}

/// POST /api/integrations/credentials
pub async fn save_credential(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<SaveCredentialRequest>,
) -> Result<Json<CredentialResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageIntegrations).await?;
    let credential = state
        .integrations
        .save_credential(&member.organization_id, &member.user_id(), &req)
        .await?;
    Ok(Json(CredentialResponse {
        success: true,
        credential,
    }))
}

/// GET /api/integrations/:provider/connect
///
/// Redirects the browser to the provider's consent screen.
pub async fn connect(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(provider): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<Redirect, AppError> {
    let member = state.access.require(&user, Action::ConnectCalendar).await?;
    let provider = parse_provider(&provider)?;
    let url = state
        .integrations
        .authorize_url(
            &member.organization_id,
            &member.user_id(),
            provider,
            query.redirect_to.as_deref(),
        )
        .await?;
    Ok(Redirect::temporary(&url))
}

/// GET /api/integrations/:provider/callback
pub async fn callback(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    let provider = parse_provider(&provider)?;
    let organization_id = state
        .access
        .profile(&user)
        .await?
        .and_then(|p| p.organization_id);
    let location = state
        .integrations
        .complete(&user, organization_id.as_ref(), provider, &params)
        .await?;
    Ok(Redirect::to(&location))
}

/// GET /api/integrations/connections
pub async fn list_connections(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Vec<CalendarConnection>>, AppError> {
    Ok(Json(state.integrations.list_connections(&user.id).await?))
}

/// DELETE /api/integrations/:provider/connection
pub async fn disconnect(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(provider): Path<String>,
) -> Result<Json<DisconnectResponse>, AppError> {
    let provider = parse_provider(&provider)?;
    state.integrations.disconnect(&user.id, provider).await?;
    Ok(Json(DisconnectResponse { success: true }))
}
