//! OAuth authorization-code exchange for calendar providers

use async_trait::async_trait;
use reqwest::Client;

use super::handle_response;
use crate::domain::entities::OAuthProvider;
use crate::domain::ports::{OAuthClient, OAuthExchange, OAuthTokens};
use crate::error::ExternalError;

#[derive(Default)]
pub struct HttpOAuthClient {
    http: Client,
}

impl HttpOAuthClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        exchange: &OAuthExchange,
    ) -> Result<OAuthTokens, ExternalError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", exchange.code.as_str()),
            ("redirect_uri", exchange.redirect_uri.as_str()),
        ];

        let request = self.http.post(provider.token_url());
        // Zoom only accepts client credentials via basic auth
        let request = match provider {
            OAuthProvider::Zoom => {
                request.basic_auth(&exchange.client_id, Some(&exchange.client_secret))
            }
            OAuthProvider::Google | OAuthProvider::Microsoft => {
                form.push(("client_id", exchange.client_id.as_str()));
                form.push(("client_secret", exchange.client_secret.as_str()));
                request
            }
        };

        let response = request.form(&form).send().await?;
        handle_response(response).await
    }
}
