//! Billing: hosted checkout, checkout verification and processor webhooks

use std::sync::Arc;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use uuid::Uuid;

use super::access_service::Member;
use crate::domain::entities::{OrganizationId, SubscriptionStatus};
use crate::domain::ports::{
    CheckoutRequest, OrganizationRepository, PaymentGateway, SubscriptionTierRepository,
};
use crate::error::AppError;

/// Accepted clock skew between the signature timestamp and now
pub const SIGNATURE_TOLERANCE_SECS: u64 = 300;

type HmacSha256 = Hmac<Sha256>;

/// Check a `t=<ts>,v1=<hex>` signature header against `"<ts>.<body>"`.
///
/// Any `v1` entry may match; stale timestamps are rejected.
pub fn verify_webhook_signature(header: &str, payload: &[u8], secret: &str, now: i64) -> bool {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", ts)) => timestamp = ts.parse::<i64>().ok(),
            Some(("v1", sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        tracing::warn!("Webhook signature header has no timestamp");
        return false;
    };
    if now.abs_diff(timestamp) > SIGNATURE_TOLERANCE_SECS {
        tracing::warn!(timestamp, now, "Webhook signature timestamp outside tolerance");
        return false;
    }

    signatures.into_iter().any(|sig| {
        let Ok(expected) = hex::decode(sig) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.verify_slice(&expected).is_ok()
    })
}

/// Processor event envelope; only the fields used here
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: Value,
}

/// What a webhook event did
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    Updated {
        organization_id: OrganizationId,
        status: SubscriptionStatus,
    },
    Ignored,
}

fn str_field<'a>(object: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(object, |v, key| v.get(*key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub struct BillingService {
    organizations: Arc<dyn OrganizationRepository>,
    tiers: Arc<dyn SubscriptionTierRepository>,
    payments: Arc<dyn PaymentGateway>,
    app_base_url: String,
    webhook_secret: Option<String>,
}

impl BillingService {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        tiers: Arc<dyn SubscriptionTierRepository>,
        payments: Arc<dyn PaymentGateway>,
        app_base_url: String,
        webhook_secret: Option<String>,
    ) -> Self {
        Self {
            organizations,
            tiers,
            payments,
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
            webhook_secret,
        }
    }

    /// Hosted checkout page URL for `tier_id`
    pub async fn checkout(
        &self,
        member: &Member,
        tier_id: &Uuid,
        customer_email: Option<&str>,
    ) -> Result<String, AppError> {
        let tier = self
            .tiers
            .find(tier_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| AppError::NotFound("Subscription tier not found".to_string()))?;

        let organization = self
            .organizations
            .find_by_id(&member.organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

        let session = self
            .payments
            .create_checkout(&CheckoutRequest {
                organization_id: organization.id,
                tier_id: tier.id,
                tier_name: tier.name,
                price_cents: tier.price_cents,
                currency: tier.currency,
                interval: tier.interval,
                customer_email: customer_email.map(str::to_string),
                customer_id: organization.billing_customer_id,
                success_url: format!(
                    "{}/settings/billing?session_id={{CHECKOUT_SESSION_ID}}",
                    self.app_base_url
                ),
                cancel_url: format!("{}/settings/billing?canceled=true", self.app_base_url),
            })
            .await?;

        tracing::info!(
            organization_id = %member.organization_id,
            tier_id = %tier_id,
            session_id = %session.id,
            "Checkout session created"
        );

        session
            .url
            .ok_or_else(|| AppError::Internal("Checkout session has no URL".to_string()))
    }

    /// Activate the caller's organization if the checkout session is paid.
    ///
    /// A session for another organization is refused.
    pub async fn verify(&self, member: &Member, session_id: &str) -> Result<bool, AppError> {
        let session = self.payments.retrieve_checkout(session_id).await?;

        if session.organization_id.as_ref() != Some(&member.organization_id) {
            return Err(AppError::Forbidden(
                "Checkout session belongs to another organization".to_string(),
            ));
        }
        if !session.paid {
            return Ok(false);
        }

        self.organizations
            .update_subscription(
                &member.organization_id,
                SubscriptionStatus::Active,
                session.tier_id,
                session.customer_id.as_deref(),
            )
            .await?;

        tracing::info!(organization_id = %member.organization_id, "Subscription activated from checkout");
        Ok(true)
    }

    /// Verify and apply one webhook delivery
    pub async fn handle_webhook(
        &self,
        signature: Option<&str>,
        payload: &[u8],
    ) -> Result<WebhookOutcome, AppError> {
        let Some(secret) = self.webhook_secret.as_deref() else {
            tracing::warn!("Webhook received but no webhook secret is configured");
            return Err(AppError::Unauthorized);
        };
        let Some(signature) = signature else {
            return Err(AppError::Unauthorized);
        };
        if !verify_webhook_signature(signature, payload, secret, chrono::Utc::now().timestamp()) {
            return Err(AppError::Unauthorized);
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {}", e)))?;
        self.apply_event(&event).await
    }

    pub async fn apply_event(&self, event: &WebhookEvent) -> Result<WebhookOutcome, AppError> {
        let object = &event.data.object;
        match event.event_type.as_str() {
            "checkout.session.completed" => {
                let Some(org_id) = str_field(object, &["metadata", "organization_id"])
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .map(OrganizationId::from)
                else {
                    tracing::warn!("Completed checkout without organization metadata");
                    return Ok(WebhookOutcome::Ignored);
                };
                let tier_id = str_field(object, &["metadata", "tier_id"])
                    .and_then(|s| Uuid::parse_str(s).ok());

                self.organizations
                    .update_subscription(
                        &org_id,
                        SubscriptionStatus::Active,
                        tier_id,
                        str_field(object, &["customer"]),
                    )
                    .await?;
                Ok(self.updated(org_id, SubscriptionStatus::Active, &event.event_type))
            }
            "customer.subscription.updated" | "customer.subscription.deleted" => {
                let Some(customer) = str_field(object, &["customer"]) else {
                    return Ok(WebhookOutcome::Ignored);
                };
                let Some(org) = self.organizations.find_by_billing_customer(customer).await? else {
                    tracing::warn!(customer = %customer, "Subscription event for unknown customer");
                    return Ok(WebhookOutcome::Ignored);
                };
                let status = if event.event_type == "customer.subscription.deleted" {
                    SubscriptionStatus::Canceled
                } else {
                    SubscriptionStatus::parse(str_field(object, &["status"]).unwrap_or_default())
                };

                self.organizations
                    .update_subscription(&org.id, status, None, None)
                    .await?;
                Ok(self.updated(org.id, status, &event.event_type))
            }
            other => {
                tracing::debug!(event_type = %other, "Ignoring webhook event");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }

    fn updated(
        &self,
        organization_id: OrganizationId,
        status: SubscriptionStatus,
        event_type: &str,
    ) -> WebhookOutcome {
        tracing::info!(
            organization_id = %organization_id,
            status = %status,
            event_type = %event_type,
            "Subscription updated from webhook"
        );
        WebhookOutcome::Updated {
            organization_id,
            status,
        }
    }
}

#[cfg(test)]
pub(crate) fn sign_webhook(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}
