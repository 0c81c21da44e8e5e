//! Session verification against the hosted auth provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use super::handle_response;
use crate::domain::entities::{SessionUser, UserId};
use crate::domain::ports::SessionVerifier;
use crate::error::ExternalError;

pub struct SupabaseSessionVerifier {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseSessionVerifier {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}

#[derive(Deserialize)]
struct AuthUserResponse {
    id: Uuid,
    email: Option<String>,
}

#[async_trait]
impl SessionVerifier for SupabaseSessionVerifier {
    async fn verify(&self, access_token: &str) -> Result<Option<SessionUser>, ExternalError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // Expired or forged tokens are a normal outcome, not a failure
        if matches!(response.status().as_u16(), 401 | 403) {
            return Ok(None);
        }

        let user: AuthUserResponse = handle_response(response).await?;
        Ok(Some(SessionUser {
            id: UserId(user.id),
            email: user.email,
        }))
    }
}
