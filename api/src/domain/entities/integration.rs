//! Calendar/meeting integrations
//!
//! Organization-level OAuth app credentials and per-user calendar connections.
//! Secrets and tokens are never part of these records; repositories hand them
//! out separately in sealed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

/// Supported OAuth providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Microsoft,
    Zoom,
}

impl OAuthProvider {
    pub fn authorize_url(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            OAuthProvider::Microsoft => {
                "https://login.microsoftonline.com/common/oauth2/v2.0/authorize"
            }
            OAuthProvider::Zoom => "https://zoom.us/oauth/authorize",
        }
    }

    pub fn token_url(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://oauth2.googleapis.com/token",
            OAuthProvider::Microsoft => "https://login.microsoftonline.com/common/oauth2/v2.0/token",
            OAuthProvider::Zoom => "https://zoom.us/oauth/token",
        }
    }

    pub fn scopes(&self) -> &'static str {
        match self {
            OAuthProvider::Google => {
                "https://www.googleapis.com/auth/calendar.events openid email"
            }
            OAuthProvider::Microsoft => "offline_access Calendars.ReadWrite OnlineMeetings.ReadWrite",
            OAuthProvider::Zoom => "meeting:write",
        }
    }

    /// Extra authorize parameters needed to receive a refresh token
    pub fn extra_authorize_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            OAuthProvider::Google => &[("access_type", "offline"), ("prompt", "consent")],
            OAuthProvider::Microsoft | OAuthProvider::Zoom => &[],
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OAuthProvider::Google => write!(f, "google"),
            OAuthProvider::Microsoft => write!(f, "microsoft"),
            OAuthProvider::Zoom => write!(f, "zoom"),
        }
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "microsoft" | "outlook" => Ok(OAuthProvider::Microsoft),
            "zoom" => Ok(OAuthProvider::Zoom),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// A row of `integration_credentials` without its secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCredential {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub provider: String,
    pub client_id: String,
    pub redirect_uri: Option<String>,
    pub is_active: bool,
    pub updated_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromRow for IntegrationCredential {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        IntegrationCredential {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            provider: r.string("provider"),
            client_id: r.string("client_id"),
            redirect_uri: r.opt_string("redirect_uri"),
            is_active: r.bool("is_active"),
            updated_by: r.opt_uuid("updated_by"),
            updated_at: r.opt_timestamp("updated_at"),
        }
    }
}

/// Data for saving (upserting) an organization's OAuth app credential
#[derive(Debug, Clone)]
pub struct SaveIntegrationCredential {
    pub organization_id: OrganizationId,
    pub provider: OAuthProvider,
    pub client_id: String,
    pub client_secret_sealed: String,
    pub redirect_uri: Option<String>,
    pub is_active: bool,
    pub updated_by: UserId,
}

/// A row of `calendar_connections` without its tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConnection {
    pub id: Uuid,
    pub user_id: UserId,
    pub provider: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for CalendarConnection {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        CalendarConnection {
            id: r.uuid("id"),
            user_id: r.uuid("user_id"),
            provider: r.string("provider"),
            expires_at: r.opt_timestamp("expires_at"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCalendarConnection {
    pub user_id: UserId,
    pub provider: OAuthProvider,
    pub access_token_sealed: String,
    pub refresh_token_sealed: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
