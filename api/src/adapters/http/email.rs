//! Transactional e-mail client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::handle_empty_response;
use crate::domain::ports::{EmailSender, OutboundEmail};
use crate::error::ExternalError;

pub struct ResendEmailSender {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    from: String,
}

impl ResendEmailSender {
    pub fn new(base_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ExternalError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ExternalError::NotConfigured("E-mail delivery"))?;

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [&email.to],
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        handle_empty_response(response).await
    }
}
