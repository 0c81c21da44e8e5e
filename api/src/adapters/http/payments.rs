//! Payment processor client (hosted checkout sessions)

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use super::handle_response;
use crate::domain::entities::OrganizationId;
use crate::domain::ports::{CheckoutRequest, CheckoutSession, PaymentGateway};
use crate::error::ExternalError;

pub struct StripePaymentGateway {
    http: Client,
    base_url: String,
    secret_key: Option<String>,
}

impl StripePaymentGateway {
    pub fn new(base_url: String, secret_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    fn secret_key(&self) -> Result<&str, ExternalError> {
        self.secret_key
            .as_deref()
            .ok_or(ExternalError::NotConfigured("Billing"))
    }
}

#[derive(Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    customer: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<CheckoutSessionResponse> for CheckoutSession {
    fn from(r: CheckoutSessionResponse) -> Self {
        let paid = matches!(
            r.payment_status.as_deref(),
            Some("paid") | Some("no_payment_required")
        );
        CheckoutSession {
            id: r.id,
            url: r.url,
            paid,
            customer_id: r.customer,
            organization_id: r
                .metadata
                .get("organization_id")
                .and_then(|s| Uuid::parse_str(s).ok())
                .map(OrganizationId),
            tier_id: r
                .metadata
                .get("tier_id")
                .and_then(|s| Uuid::parse_str(s).ok()),
        }
    }
}

/// Form fields for a subscription-mode checkout session
fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "subscription".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
        (
            "client_reference_id".to_string(),
            request.organization_id.to_string(),
        ),
        (
            "metadata[organization_id]".to_string(),
            request.organization_id.to_string(),
        ),
        ("metadata[tier_id]".to_string(), request.tier_id.to_string()),
        (
            "subscription_data[metadata][organization_id]".to_string(),
            request.organization_id.to_string(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            request.currency.to_lowercase(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            request.price_cents.to_string(),
        ),
        (
            "line_items[0][price_data][recurring][interval]".to_string(),
            request.interval.clone(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.tier_name.clone(),
        ),
    ];

    match (&request.customer_id, &request.customer_email) {
        (Some(customer), _) => form.push(("customer".to_string(), customer.clone())),
        (None, Some(email)) => form.push(("customer_email".to_string(), email.clone())),
        (None, None) => {}
    }

    form
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ExternalError> {
        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(self.secret_key()?)
            .form(&checkout_form(request))
            .send()
            .await?;

        let session: CheckoutSessionResponse = handle_response(response).await?;
        Ok(session.into())
    }

    async fn retrieve_checkout(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, ExternalError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{}",
                self.base_url,
                urlencoding::encode(session_id)
            ))
            .bearer_auth(self.secret_key()?)
            .send()
            .await?;

        let session: CheckoutSessionResponse = handle_response(response).await?;
        Ok(session.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            organization_id: OrganizationId(Uuid::nil()),
            tier_id: Uuid::nil(),
            tier_name: "Growth".to_string(),
            price_cents: 9900,
            currency: "USD".to_string(),
            interval: "month".to_string(),
            customer_email: Some("owner@example.com".to_string()),
            customer_id: None,
            success_url: "https://app/billing?session_id={CHECKOUT_SESSION_ID}".to_string(),
            cancel_url: "https://app/billing".to_string(),
        }
    }

    #[test]
    fn checkout_form_carries_org_metadata_and_price() {
        let form = checkout_form(&request());
        let get = |k: &str| form.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("mode"), Some("subscription"));
        assert_eq!(get("metadata[tier_id]"), Some(Uuid::nil().to_string().as_str()));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("9900"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(get("customer_email"), Some("owner@example.com"));
        assert_eq!(get("customer"), None);
    }

    #[test]
    fn existing_customer_wins_over_email() {
        let mut req = request();
        req.customer_id = Some("cus_123".to_string());
        let form = checkout_form(&req);
        assert!(form.iter().any(|(k, v)| k == "customer" && v == "cus_123"));
        assert!(!form.iter().any(|(k, _)| k == "customer_email"));
    }

    #[test]
    fn session_response_maps_metadata() {
        let raw: CheckoutSessionResponse = serde_json::from_value(serde_json::json!({
            "id": "cs_test_1",
            "url": null,
            "payment_status": "paid",
            "customer": "cus_9",
            "metadata": {
                "organization_id": "5b1f0f8e-0000-4000-8000-000000000001",
                "tier_id": "not-a-uuid"
            }
        }))
        .unwrap();
        let session: CheckoutSession = raw.into();
        assert!(session.paid);
        assert_eq!(session.customer_id.as_deref(), Some("cus_9"));
        assert!(session.organization_id.is_some());
        assert_eq!(session.tier_id, None);
    }

    #[tokio::test]
    async fn missing_secret_key_is_not_configured() {
        let gateway = StripePaymentGateway::new("http://127.0.0.1:9".to_string(), None);
        let err = gateway.retrieve_checkout("cs_1").await.unwrap_err();
        assert!(matches!(err, ExternalError::NotConfigured(_)));
    }
}
