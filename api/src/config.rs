use std::env;

use anyhow::{Context, Result};

/// OAuth application credentials supplied through the environment
#[derive(Clone, Debug, Default)]
pub struct OAuthAppConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl OAuthAppConfig {
    fn from_env(prefix: &str) -> Self {
        Self {
            client_id: env::var(format!("{}_CLIENT_ID", prefix)).ok(),
            client_secret: env::var(format!("{}_CLIENT_SECRET", prefix)).ok(),
        }
    }

    /// Both halves present
    pub fn pair(&self) -> Option<(String, String)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Public base URL of this API (used for OAuth redirect URIs)
    pub app_base_url: String,
    /// Auth provider base URL
    pub auth_url: String,
    /// Anonymous key sent as the `apikey` header to the auth provider
    pub auth_anon_key: String,
    /// Name of the cookie carrying the session access token
    pub session_cookie: String,
    /// Object storage base URL
    pub storage_url: String,
    pub storage_service_key: String,
    pub email_api_url: String,
    pub email_api_key: Option<String>,
    pub email_from: String,
    pub payments_api_url: String,
    pub payments_secret_key: Option<String>,
    /// Webhook secret for verifying payment processor events (HMAC-SHA256)
    pub payments_webhook_secret: Option<String>,
    /// Key used to seal OAuth secrets and tokens at rest
    pub encryption_key: String,
    pub google: OAuthAppConfig,
    pub microsoft: OAuthAppConfig,
    pub zoom: OAuthAppConfig,
    /// Per-IP rate limiting on public write endpoints
    pub rate_limit_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            auth_url: env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:54321".to_string()),
            auth_anon_key: env::var("AUTH_ANON_KEY").unwrap_or_default(),
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "sb-access-token".to_string()),
            storage_url: env::var("STORAGE_URL")
                .or_else(|_| env::var("AUTH_URL"))
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY").unwrap_or_default(),
            email_api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            email_api_key: env::var("EMAIL_API_KEY").ok(),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Hireloop <no-reply@hireloop.local>".to_string()),
            payments_api_url: env::var("PAYMENTS_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            payments_secret_key: env::var("PAYMENTS_SECRET_KEY").ok(),
            payments_webhook_secret: env::var("PAYMENTS_WEBHOOK_SECRET").ok(),
            encryption_key: env::var("ENCRYPTION_KEY")
                .unwrap_or_else(|_| "dev-key-not-for-production".to_string()),
            google: OAuthAppConfig::from_env("GOOGLE"),
            microsoft: OAuthAppConfig::from_env("MICROSOFT"),
            zoom: OAuthAppConfig::from_env("ZOOM"),
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}
