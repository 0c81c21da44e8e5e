//! Calendar integrations
//!
//! Org-level OAuth app credentials and the per-user authorization-code flow.
//! The OAuth `state` parameter is `base64url(JSON { userId, redirectTo })`
//! without padding.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::secrets::SecretBox;
use super::validation::required;
use crate::config::Config;
use crate::domain::entities::{
    CalendarConnection, IntegrationCredential, NewCalendarConnection, OAuthProvider,
    OrganizationId, SaveIntegrationCredential, SessionUser, UserId,
};
use crate::domain::ports::{IntegrationRepository, OAuthClient, OAuthExchange};
use crate::error::AppError;

pub const DEFAULT_REDIRECT: &str = "/settings/integrations";

/// Absolute expiry for a provider's `expires_in`; out-of-range values are dropped
fn token_expiry(expires_in: Option<i64>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    expires_in
        .and_then(Duration::try_seconds)
        .and_then(|d| now.checked_add_signed(d))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthState {
    pub user_id: UserId,
    pub redirect_to: String,
}

impl OAuthState {
    pub fn encode(&self) -> Result<String, AppError> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AppError::Internal(format!("failed to encode OAuth state: {}", e)))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Only same-site relative paths are accepted as post-login redirects
pub fn safe_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

/// Append `key=value` to a relative URL
pub fn with_query(path: &str, key: &str, value: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        path,
        separator,
        key,
        urlencoding::encode(value)
    )
}

pub fn parse_provider(raw: &str) -> Result<OAuthProvider, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unsupported provider: {}", raw)))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCredentialRequest {
    pub provider: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters the provider sends back to the callback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Client credentials resolved for one provider
#[derive(Debug, Clone)]
struct OAuthApp {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

pub struct IntegrationService {
    integrations: Arc<dyn IntegrationRepository>,
    oauth: Arc<dyn OAuthClient>,
    secrets: SecretBox,
    config: Config,
}

impl IntegrationService {
    pub fn new(
        integrations: Arc<dyn IntegrationRepository>,
        oauth: Arc<dyn OAuthClient>,
        secrets: SecretBox,
        config: Config,
    ) -> Self {
        Self {
            integrations,
            oauth,
            secrets,
            config,
        }
    }

    pub async fn list_credentials(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<IntegrationCredential>, AppError> {
        Ok(self.integrations.list_credentials(organization_id).await?)
    }

    pub async fn save_credential(
        &self,
        organization_id: &OrganizationId,
        updated_by: &UserId,
        request: &SaveCredentialRequest,
    ) -> Result<IntegrationCredential, AppError> {
        let provider = parse_provider(required(request.provider.as_deref(), "provider")?)?;
        let client_id = required(request.client_id.as_deref(), "clientId")?;
        let client_secret = required(request.client_secret.as_deref(), "clientSecret")?;

        let credential = self
            .integrations
            .save_credential(&SaveIntegrationCredential {
                organization_id: *organization_id,
                provider,
                client_id: client_id.to_string(),
                client_secret_sealed: self.secrets.seal(client_secret)?,
                redirect_uri: request
                    .redirect_uri
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                is_active: request.is_active.unwrap_or(true),
                updated_by: *updated_by,
            })
            .await?;

        tracing::info!(
            organization_id = %organization_id,
            provider = %provider,
            "Integration credential saved"
        );
        Ok(credential)
    }

    fn default_redirect_uri(&self, provider: OAuthProvider) -> String {
        format!(
            "{}/api/integrations/{}/callback",
            self.config.app_base_url.trim_end_matches('/'),
            provider
        )
    }

    /// Organization credential first, then environment configuration
    async fn resolve_app(
        &self,
        organization_id: Option<&OrganizationId>,
        provider: OAuthProvider,
    ) -> Result<OAuthApp, AppError> {
        if let Some(org_id) = organization_id {
            if let Some((credential, sealed)) = self
                .integrations
                .find_active_credential(org_id, provider)
                .await?
            {
                return Ok(OAuthApp {
                    client_id: credential.client_id,
                    client_secret: self.secrets.open(&sealed)?,
                    redirect_uri: credential
                        .redirect_uri
                        .unwrap_or_else(|| self.default_redirect_uri(provider)),
                });
            }
        }

        let env_app = match provider {
            OAuthProvider::Google => &self.config.google,
            OAuthProvider::Microsoft => &self.config.microsoft,
            OAuthProvider::Zoom => &self.config.zoom,
        };
        let (client_id, client_secret) = env_app
            .pair()
            .ok_or_else(|| AppError::BadRequest("Provider not configured".to_string()))?;

        Ok(OAuthApp {
            client_id,
            client_secret,
            redirect_uri: self.default_redirect_uri(provider),
        })
    }

    /// Provider authorize URL for the connect redirect
    pub async fn authorize_url(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<String, AppError> {
        let app = self.resolve_app(Some(organization_id), provider).await?;
        let state = OAuthState {
            user_id: *user_id,
            redirect_to: safe_redirect(redirect_to),
        }
        .encode()?;

        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", app.client_id.as_str()),
            ("redirect_uri", app.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", provider.scopes()),
            ("state", state.as_str()),
        ];
        params.extend_from_slice(provider.extra_authorize_params());

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", provider.authorize_url(), query))
    }

    /// Finish the authorization-code flow and return where to send the browser
    pub async fn complete(
        &self,
        user: &SessionUser,
        organization_id: Option<&OrganizationId>,
        provider: OAuthProvider,
        params: &CallbackParams,
    ) -> Result<String, AppError> {
        let state = params.state.as_deref().and_then(OAuthState::decode);
        let Some(state) = state.filter(|s| s.user_id == user.id) else {
            tracing::warn!(user_id = %user.id, provider = %provider, "OAuth state missing or for another user");
            return Ok(with_query(DEFAULT_REDIRECT, "error", "invalid_state"));
        };
        let redirect_to = safe_redirect(Some(&state.redirect_to));

        if let Some(error) = params.error.as_deref() {
            return Ok(with_query(&redirect_to, "error", error));
        }
        let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
            return Ok(with_query(&redirect_to, "error", "missing_code"));
        };

        let app = match self.resolve_app(organization_id, provider).await {
            Ok(app) => app,
            Err(AppError::BadRequest(msg)) => return Ok(with_query(&redirect_to, "error", &msg)),
            Err(e) => return Err(e),
        };

        let tokens = match self
            .oauth
            .exchange_code(
                provider,
                &OAuthExchange {
                    code: code.to_string(),
                    redirect_uri: app.redirect_uri,
                    client_id: app.client_id,
                    client_secret: app.client_secret,
                },
            )
            .await
        {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user.id, provider = %provider, "OAuth code exchange failed");
                return Ok(with_query(&redirect_to, "error", "token_exchange_failed"));
            }
        };

        let refresh_token_sealed = match tokens.refresh_token.as_deref() {
            Some(token) => Some(self.secrets.seal(token)?),
            None => None,
        };

        self.integrations
            .upsert_connection(&NewCalendarConnection {
                user_id: user.id,
                provider,
                access_token_sealed: self.secrets.seal(&tokens.access_token)?,
                refresh_token_sealed,
                expires_at: token_expiry(tokens.expires_in, Utc::now()),
            })
            .await?;

        tracing::info!(user_id = %user.id, provider = %provider, "Calendar connected");
        Ok(with_query(&redirect_to, "connected", &provider.to_string()))
    }

    pub async fn list_connections(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CalendarConnection>, AppError> {
        Ok(self.integrations.list_connections(user_id).await?)
    }

    pub async fn disconnect(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
    ) -> Result<(), AppError> {
        if !self.integrations.delete_connection(user_id, provider).await? {
            return Err(AppError::NotFound(format!("No {} connection", provider)));
        }
        Ok(())
    }
}
