//! Ports for third-party services
//!
//! Authentication, object storage, e-mail delivery, payments and OAuth token
//! exchange all live outside this service. Each call is a single attempt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{OAuthProvider, OrganizationId, SessionUser};
use crate::error::{DomainError, ExternalError};

/// Validates session access tokens with the auth provider
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` when the token is unknown or expired
    async fn verify(&self, access_token: &str) -> Result<Option<SessionUser>, ExternalError>;
}

/// Object storage with public and signed URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ExternalError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Time-limited URL valid for `expires_in` seconds
    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, ExternalError>;

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ExternalError>;
}

/// A single outbound e-mail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ExternalError>;
}

/// Parameters for a hosted checkout page
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub organization_id: OrganizationId,
    pub tier_id: Uuid,
    pub tier_name: String,
    pub price_cents: i64,
    pub currency: String,
    pub interval: String,
    pub customer_email: Option<String>,
    pub customer_id: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Checkout session as reported by the payment processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub paid: bool,
    pub customer_id: Option<String>,
    pub organization_id: Option<OrganizationId>,
    pub tier_id: Option<Uuid>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ExternalError>;

    async fn retrieve_checkout(&self, session_id: &str)
        -> Result<CheckoutSession, ExternalError>;
}

/// Authorization-code exchange parameters
#[derive(Debug, Clone)]
pub struct OAuthExchange {
    pub code: String,
    pub redirect_uri: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds
    pub expires_in: Option<i64>,
}

#[async_trait]
pub trait OAuthClient: Send + Sync {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        exchange: &OAuthExchange,
    ) -> Result<OAuthTokens, ExternalError>;
}

/// Liveness probe for the database
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
